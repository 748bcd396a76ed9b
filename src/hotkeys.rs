// Global shortcuts via the host's keybinding subsystem.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::Config;
use crate::shield::Shield;

/// A registered keybinding. Hand it back to `unbind` at deactivation.
pub struct ShortcutBinding(pub u64);

/// The host's input subsystem. Bind failures are per-accelerator and must
/// not take down the feature.
pub trait ShortcutRegistrar {
    fn bind(&self, accelerator: &str, action: Box<dyn Fn()>) -> Result<ShortcutBinding>;
    fn unbind(&self, binding: ShortcutBinding);
}

/// Bind every configured accelerator to its shield operation. A failed bind
/// is logged and skipped; the remaining shortcuts still register.
pub fn bind_all(
    registrar: &dyn ShortcutRegistrar,
    config: &Config,
    shield: &Rc<RefCell<Shield>>,
) -> Vec<ShortcutBinding> {
    let mut bindings = Vec::new();

    let actions: [(&[String], fn(&mut Shield)); 3] = [
        (&config.hide_shortcut, Shield::hide),
        (&config.reveal_shortcut, Shield::reveal),
        (&config.toggle_shortcut, Shield::toggle),
    ];

    for (accelerators, operation) in actions {
        for accelerator in accelerators {
            let shield = Rc::clone(shield);
            let action = Box::new(move || operation(&mut shield.borrow_mut()));
            match registrar.bind(accelerator, action) {
                Ok(binding) => {
                    debug!(%accelerator, "shortcut bound");
                    bindings.push(binding);
                }
                Err(e) => warn!(%accelerator, "failed to bind shortcut: {e}"),
            }
        }
    }

    bindings
}

pub fn unbind_all(registrar: &dyn ShortcutRegistrar, bindings: Vec<ShortcutBinding>) {
    for binding in bindings {
        registrar.unbind(binding);
    }
}
