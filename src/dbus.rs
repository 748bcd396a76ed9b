// Session-bus control surface.
//
// Exports Hide/Reveal/Toggle and the readonly Status property on a
// well-known name. The zbus executor runs on its own thread, but mutation
// stays on the host loop: method calls only enqueue a request on a channel
// the host drains, and the property reads an atomic snapshot the shield
// keeps current through its change callback.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};
use zbus::blocking::connection::Builder;
use zbus::blocking::Connection;

use crate::shield::VisibilityStatus;

pub const BUS_NAME: &str = "org.screenveil.ScreenVeil";
pub const OBJECT_PATH: &str = "/org/screenveil/ScreenVeil";

/// A control-surface method call, handed to the host loop for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    Hide,
    Reveal,
    Toggle,
}

struct ShieldInterface {
    requests: Sender<ControlRequest>,
    status: Arc<AtomicU32>,
}

#[zbus::interface(name = "org.screenveil.ScreenVeil")]
impl ShieldInterface {
    fn hide(&self) {
        let _ = self.requests.send(ControlRequest::Hide);
    }

    fn reveal(&self) {
        let _ = self.requests.send(ControlRequest::Reveal);
    }

    fn toggle(&self) {
        let _ = self.requests.send(ControlRequest::Toggle);
    }

    /// 0 = Visible, 1 = Hidden.
    #[zbus(property)]
    fn status(&self) -> u32 {
        self.status.load(Ordering::SeqCst)
    }
}

/// The exported bus object, alive for one activation.
pub struct ControlSurface {
    conn: Connection,
    status: Arc<AtomicU32>,
}

impl ControlSurface {
    /// Acquire the well-known name and serve the control object. Fails when
    /// the name is already held; the caller logs and continues without the
    /// bus interface.
    pub fn export() -> zbus::Result<(Self, Receiver<ControlRequest>)> {
        let (requests, receiver) = crossbeam_channel::unbounded();
        let status = Arc::new(AtomicU32::new(VisibilityStatus::Visible.as_raw()));
        let conn = Builder::session()?
            .name(BUS_NAME)?
            .serve_at(
                OBJECT_PATH,
                ShieldInterface {
                    requests,
                    status: Arc::clone(&status),
                },
            )?
            .build()?;
        debug!(name = BUS_NAME, "control surface exported");
        Ok((Self { conn, status }, receiver))
    }

    /// Update the property snapshot and emit PropertiesChanged. Called from
    /// the shield's change callback on every status mutation.
    pub fn notify_status(&self, status: VisibilityStatus) {
        self.status.store(status.as_raw(), Ordering::SeqCst);
        let iface = match self
            .conn
            .object_server()
            .interface::<_, ShieldInterface>(OBJECT_PATH)
        {
            Ok(iface) => iface,
            Err(e) => {
                warn!("control object not served, skipping status signal: {e}");
                return;
            }
        };
        let result = zbus::block_on(iface.get().status_changed(iface.signal_emitter()));
        if let Err(e) = result {
            warn!("failed to emit status change: {e}");
        }
    }

    /// Give the well-known name back at deactivation.
    pub fn release(self) {
        if let Err(e) = self.conn.release_name(BUS_NAME) {
            warn!("failed to release bus name: {e}");
        }
    }
}
