//! Method names of the command surface

/// Commands understood on the `screen_secure` channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Init,
    EnableScreenshotBlock,
    DisableScreenshotBlock,
    EnableScreenRecordBlock,
    DisableScreenRecordBlock,
    IsScreenRecording,
    GetSecurityStatus,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Init,
        Method::EnableScreenshotBlock,
        Method::DisableScreenshotBlock,
        Method::EnableScreenRecordBlock,
        Method::DisableScreenRecordBlock,
        Method::IsScreenRecording,
        Method::GetSecurityStatus,
    ];

    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Init => "init",
            Method::EnableScreenshotBlock => "enableScreenshotBlock",
            Method::DisableScreenshotBlock => "disableScreenshotBlock",
            Method::EnableScreenRecordBlock => "enableScreenRecordBlock",
            Method::DisableScreenRecordBlock => "disableScreenRecordBlock",
            Method::IsScreenRecording => "isScreenRecording",
            Method::GetSecurityStatus => "getSecurityStatus",
        }
    }

    /// Look up a method by wire name. Unknown names are not an error; the
    /// caller answers them with a not-implemented outcome.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names_resolve() {
        for method in Method::ALL {
            assert_eq!(Method::from_name(method.as_str()), Some(method));
        }
        assert_eq!(Method::from_name("enableScreenshotBlock"), Some(Method::EnableScreenshotBlock));
        assert_eq!(Method::from_name("EnableScreenshotBlock"), None);
        assert_eq!(Method::from_name("wipeDevice"), None);
    }
}
