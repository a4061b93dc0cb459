//! Windows display affinity
//!
//! `WDA_EXCLUDEFROMCAPTURE` keeps the window out of screenshots and screen
//! recordings (Windows 10 2004 and later).

use protection::{EffectorError, EffectorResult};
use tracing::{debug, warn};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, SetWindowDisplayAffinity, WDA_EXCLUDEFROMCAPTURE, WDA_NONE,
};

use crate::SecureWindow;

/// Native window protected through its display affinity
pub struct DisplayAffinityWindow {
    // Stored as an integer so the window can move between threads
    hwnd: isize,
    secure: bool,
}

impl DisplayAffinityWindow {
    pub fn from_raw(hwnd: isize) -> EffectorResult<Self> {
        if hwnd == 0 {
            return Err(EffectorError::NoSurface);
        }
        Ok(Self {
            hwnd,
            secure: false,
        })
    }

    /// The window currently in the foreground
    pub fn foreground() -> EffectorResult<Self> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            warn!("No foreground window to protect");
            return Err(EffectorError::NoSurface);
        }
        Self::from_raw(hwnd.0 as isize)
    }

    fn handle(&self) -> HWND {
        HWND(self.hwnd as *mut core::ffi::c_void)
    }
}

impl SecureWindow for DisplayAffinityWindow {
    fn set_secure(&mut self, secure: bool) -> EffectorResult<()> {
        let affinity = if secure {
            WDA_EXCLUDEFROMCAPTURE
        } else {
            WDA_NONE
        };

        debug!("SetWindowDisplayAffinity({:#x}, secure={})", self.hwnd, secure);
        unsafe { SetWindowDisplayAffinity(self.handle(), affinity) }
            .map_err(|e| EffectorError::Platform(e.to_string()))?;

        self.secure = secure;
        Ok(())
    }

    fn is_secure(&self) -> bool {
        self.secure
    }
}
