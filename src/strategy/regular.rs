// Regular strategy: nothing is armed while the screen is visible.
//
// The expected common state over a session is Visible, so this strategy
// holds no compositor resources at all in that state — unredirect stays
// enabled and no cursor subscription exists. Each hide pays the full setup
// cost, each reveal the full teardown cost.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::compositor::{CursorSubscription, DisplayConfig, ObscuringEffect};
use crate::shield::VisibilityStatus;
use crate::strategy::Strategy;

pub struct Regular {
    config: DisplayConfig,
    effect: ObscuringEffect,
    cursor_sub: Option<CursorSubscription>,
    status: Rc<Cell<VisibilityStatus>>,
}

impl Regular {
    pub fn new(config: DisplayConfig, status: Rc<Cell<VisibilityStatus>>) -> Self {
        Self {
            config,
            effect: ObscuringEffect::blackout(),
            cursor_sub: None,
            status,
        }
    }

    // The subscription only exists while hidden, so the callback needs no
    // status guard: any externally forced cursor re-show is immediately
    // undone.
    fn subscribe_cursor(&mut self) {
        let tracker = Rc::clone(&self.config.cursor);
        let subscription = self
            .config
            .cursor
            .connect_visibility_changed(Rc::new(move |visible| {
                if visible {
                    tracker.set_pointer_visible(false);
                }
            }));
        self.cursor_sub = Some(subscription);
    }
}

impl Strategy for Regular {
    fn hide_transition(&mut self) {
        debug!("regular: hiding screen");
        self.config.redirection.disable_unredirect();
        self.config.root.add_effect(&self.effect);
        self.subscribe_cursor();
        self.config.cursor.set_pointer_visible(false);
    }

    fn reveal_transition(&mut self) {
        debug!("regular: revealing screen");
        self.config.redirection.enable_unredirect();
        self.config.root.remove_effect(&self.effect);
        if let Some(subscription) = self.cursor_sub.take() {
            self.config.cursor.disconnect_visibility_changed(subscription);
        }
    }

    // Resources are never patched in place: return to baseline against the
    // old handles, adopt the new ones, then re-hide if that was the state.
    fn reconfigure(&mut self, config: DisplayConfig) {
        let was_hidden = self.status.get() == VisibilityStatus::Hidden;
        self.reveal_transition();
        self.config = config;
        if was_hidden {
            self.hide_transition();
        }
    }

    fn teardown(&mut self) {
        self.reveal_transition();
    }
}
