// Screen-privacy feature for a desktop compositor.
//
// On demand, blacks out the screen and hides the pointer. Controlled by
// global shortcuts, a session-bus object (Hide/Reveal/Toggle + Status), or
// direct calls on the feature instance. Two strategies: Regular does no
// compositor work while the screen is visible; Low-Latency keeps unredirect
// disabled and the cursor subscription armed continuously so each toggle
// only flips the effect.
//
// Everything runs single-threaded on the host's event loop. The one
// exception is the zbus executor thread, which only enqueues requests on a
// channel the host drains through `ScreenVeil::dispatch_control`.

pub mod compositor;
pub mod config;
pub mod dbus;
pub mod hotkeys;
pub mod shield;
pub mod strategy;

use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::Receiver;
use tracing::{error, info};

use compositor::{DisplayConfig, MonitorManager, MonitorSubscription};
use config::Config;
use dbus::{ControlRequest, ControlSurface};
use hotkeys::{ShortcutBinding, ShortcutRegistrar};
use shield::{Shield, VisibilityStatus};
use strategy::Mode;

/// The host hooks the feature consumes: a factory producing a fresh
/// [`DisplayConfig`] for the current topology, the monitor-change notifier,
/// and the keybinding subsystem.
pub struct Host {
    pub display: Rc<dyn Fn() -> DisplayConfig>,
    pub monitors: Rc<dyn MonitorManager>,
    pub shortcuts: Rc<dyn ShortcutRegistrar>,
}

/// The feature instance, one per activation. No process-wide global: the
/// host owns it and drops it through [`ScreenVeil::deactivate`].
pub struct ScreenVeil {
    shield: Rc<RefCell<Shield>>,
    control: Option<Rc<ControlSurface>>,
    control_requests: Option<Receiver<ControlRequest>>,
    bindings: Vec<ShortcutBinding>,
    monitor_sub: Option<MonitorSubscription>,
    host: Host,
}

impl ScreenVeil {
    /// Bring the feature up: build the shield with the configured strategy,
    /// export the control surface, watch for topology changes and bind the
    /// shortcuts. Control-surface failure (the name is already held) is
    /// logged and the feature continues keyboard-only.
    pub fn activate(config: &Config, host: Host) -> Self {
        let mode = Mode::from_raw(config.mode);
        info!(?mode, "activating screen veil");

        let shield = Rc::new(RefCell::new(Shield::new(mode, (host.display.as_ref())())));

        let (control, control_requests) = match ControlSurface::export() {
            Ok((surface, receiver)) => (Some(Rc::new(surface)), Some(receiver)),
            Err(e) => {
                error!("could not export control surface, continuing without it: {e}");
                (None, None)
            }
        };
        if let Some(surface) = &control {
            let surface = Rc::clone(surface);
            shield
                .borrow_mut()
                .set_on_change(Box::new(move |status| surface.notify_status(status)));
        }

        let monitor_sub = {
            let shield = Rc::clone(&shield);
            let display = Rc::clone(&host.display);
            host.monitors
                .connect_changed(Box::new(move || {
                    shield.borrow_mut().reconfigure((display.as_ref())())
                }))
        };

        let bindings = hotkeys::bind_all(host.shortcuts.as_ref(), config, &shield);

        Self {
            shield,
            control,
            control_requests,
            bindings,
            monitor_sub: Some(monitor_sub),
            host,
        }
    }

    /// Apply any control-surface requests that arrived since the last call.
    /// Invoked by the host loop so all mutation stays on one thread.
    pub fn dispatch_control(&self) {
        let Some(receiver) = &self.control_requests else {
            return;
        };
        while let Ok(request) = receiver.try_recv() {
            let mut shield = self.shield.borrow_mut();
            match request {
                ControlRequest::Hide => shield.hide(),
                ControlRequest::Reveal => shield.reveal(),
                ControlRequest::Toggle => shield.toggle(),
            }
        }
    }

    pub fn hide(&self) {
        self.shield.borrow_mut().hide();
    }

    pub fn reveal(&self) {
        self.shield.borrow_mut().reveal();
    }

    pub fn toggle(&self) {
        self.shield.borrow_mut().toggle();
    }

    pub fn status(&self) -> VisibilityStatus {
        self.shield.borrow().status()
    }

    /// Tear the feature down: unbind shortcuts, stop watching topology,
    /// restore the screen and cursor, release the bus name.
    pub fn deactivate(mut self) {
        info!("deactivating screen veil");
        hotkeys::unbind_all(
            self.host.shortcuts.as_ref(),
            std::mem::take(&mut self.bindings),
        );
        if let Some(subscription) = self.monitor_sub.take() {
            self.host.monitors.disconnect_changed(subscription);
        }
        {
            let mut shield = self.shield.borrow_mut();
            shield.teardown();
            shield.clear_on_change();
        }
        self.control_requests = None;
        if let Some(surface) = self.control.take() {
            if let Ok(surface) = Rc::try_unwrap(surface) {
                surface.release();
            }
        }
    }
}
