//! Bridge state: the controller of the hosting surface and the output sink

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use protection::{BoxedController, ProtectionEvent};
use secure_protocol::{ErrorCode, InboundMessage, MethodOutcome, OutboundMessage};
use anyhow::Context;
use tracing::{debug, error, info, warn};

use crate::commands;

/// What the read loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Detach,
}

/// Application-wide state
pub struct BridgeState<W: Write + Send + 'static> {
    /// Protection state machine of the hosting surface
    controller: BoxedController,
    /// Shared with the event forwarder
    output: Arc<Mutex<W>>,
    forwarder: Option<JoinHandle<()>>,
}

impl<W: Write + Send + 'static> BridgeState<W> {
    pub fn new(mut controller: BoxedController, output: W) -> Self {
        let output = Arc::new(Mutex::new(output));
        let events = controller.subscribe();
        let forwarder = spawn_event_forwarder(events, Arc::clone(&output));

        Self {
            controller,
            output,
            forwarder: Some(forwarder),
        }
    }

    pub fn controller_mut(&mut self) -> &mut BoxedController {
        &mut self.controller
    }

    pub fn output(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.output)
    }

    /// Serve `input` until the host detaches or the input ends, then shut
    /// down. The surface is released even when serving fails.
    pub fn run<R: BufRead>(mut self, input: R) -> anyhow::Result<()> {
        let served = self.serve(input);
        if let Err(e) = &served {
            error!("Bridge loop failed: {:#}", e);
        }

        let released = self.shutdown();
        served.and(released)
    }

    fn serve<R: BufRead>(&mut self, input: R) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read from input")?;
            if line.trim().is_empty() {
                continue;
            }

            if self.handle_line(&line)? == Flow::Detach {
                info!("Host requested detach");
                break;
            }
        }
        Ok(())
    }

    /// Handle one inbound line
    pub fn handle_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        let message = match InboundMessage::from_line(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Malformed inbound line: {}", e);
                let outcome = MethodOutcome::error(ErrorCode::InvalidArguments, e.to_string(), None);
                self.send(&OutboundMessage::response(None, outcome))?;
                return Ok(Flow::Continue);
            }
        };

        match message {
            InboundMessage::Call(call) => {
                let outcome = commands::dispatch(&mut self.controller, &call);
                self.send(&OutboundMessage::response(call.id, outcome))?;
                Ok(Flow::Continue)
            }
            InboundMessage::CaptureChanged { captured } => {
                self.controller.capture_changed(captured);
                Ok(Flow::Continue)
            }
            InboundMessage::Detach => Ok(Flow::Detach),
        }
    }

    fn send(&self, message: &OutboundMessage) -> anyhow::Result<()> {
        write_message(&self.output, message)
    }

    /// Release the surface and wait for pending events to be written
    pub fn shutdown(self) -> anyhow::Result<()> {
        let Self {
            controller,
            forwarder,
            ..
        } = self;

        // Detaching drops the event senders, which ends the forwarder
        let released = controller.detach();

        if let Some(handle) = forwarder {
            if handle.join().is_err() {
                error!("Event forwarder panicked");
            }
        }

        released.context("Failed to release the hosting surface")
    }
}

fn write_message<W: Write>(output: &Mutex<W>, message: &OutboundMessage) -> anyhow::Result<()> {
    let line = message.to_line()?;
    let mut out = output.lock();
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}

/// Forward push events until every sender is gone
fn spawn_event_forwarder<W: Write + Send + 'static>(
    events: Receiver<ProtectionEvent>,
    output: Arc<Mutex<W>>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for event in events.iter() {
            let message = match event {
                ProtectionEvent::ScreenRecordingChanged { recording } => {
                    OutboundMessage::recording_changed(recording)
                }
            };

            if let Err(e) = write_message(&output, &message) {
                error!("Failed to forward event: {}", e);
                break;
            }
        }
        debug!("Event forwarder stopped");
    })
}
