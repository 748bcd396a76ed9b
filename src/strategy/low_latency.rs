// Low-latency strategy: the expensive parts stay armed for the whole
// activation.
//
// Unredirect is disabled and the cursor subscription is live from
// construction on, even while the screen is visible. A hide/reveal then only
// attaches/detaches the obscuring effect, which keeps toggle latency at the
// cost of one compositor optimization held off continuously.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::compositor::{CursorSubscription, DisplayConfig, ObscuringEffect};
use crate::shield::VisibilityStatus;
use crate::strategy::Strategy;

pub struct LowLatency {
    config: DisplayConfig,
    effect: ObscuringEffect,
    cursor_sub: Option<CursorSubscription>,
    status: Rc<Cell<VisibilityStatus>>,
}

impl LowLatency {
    pub fn new(config: DisplayConfig, status: Rc<Cell<VisibilityStatus>>) -> Self {
        let mut strategy = Self {
            config,
            effect: ObscuringEffect::blackout(),
            cursor_sub: None,
            status,
        };
        strategy.arm();
        strategy
    }

    fn arm(&mut self) {
        self.config.redirection.disable_unredirect();
        self.subscribe_cursor();
    }

    // The subscription is live even while visible, so the callback must
    // check status: only reassert invisibility while hidden, never fight
    // the user's cursor during normal use.
    fn subscribe_cursor(&mut self) {
        let tracker = Rc::clone(&self.config.cursor);
        let status = Rc::clone(&self.status);
        let subscription = self
            .config
            .cursor
            .connect_visibility_changed(Rc::new(move |visible| {
                if visible && status.get() == VisibilityStatus::Hidden {
                    tracker.set_pointer_visible(false);
                }
            }));
        self.cursor_sub = Some(subscription);
    }

    fn disarm(&mut self) {
        self.config.redirection.enable_unredirect();
        if let Some(subscription) = self.cursor_sub.take() {
            self.config.cursor.disconnect_visibility_changed(subscription);
        }
    }
}

impl Strategy for LowLatency {
    fn hide_transition(&mut self) {
        debug!("low-latency: hiding screen");
        self.config.root.add_effect(&self.effect);
        self.config.cursor.set_pointer_visible(false);
    }

    fn reveal_transition(&mut self) {
        debug!("low-latency: revealing screen");
        self.config.root.remove_effect(&self.effect);
    }

    fn reconfigure(&mut self, config: DisplayConfig) {
        let hidden = self.status.get() == VisibilityStatus::Hidden;
        if hidden {
            self.config.root.remove_effect(&self.effect);
        }
        self.disarm();
        self.config = config;
        self.arm();
        if hidden {
            self.config.root.add_effect(&self.effect);
            // The live subscription would reassert this on the next cursor
            // event anyway; forcing it now converges immediately.
            self.config.cursor.set_pointer_visible(false);
        }
    }

    fn teardown(&mut self) {
        if self.status.get() == VisibilityStatus::Hidden {
            self.config.root.remove_effect(&self.effect);
        }
        self.disarm();
    }
}
