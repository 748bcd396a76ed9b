// The visibility state machine.
//
// Two states, three operations, one observable property. All the expensive
// compositor work lives in the active strategy; the shield only decides
// whether a transition is needed, records the new status and fires the
// change notification the control surface listens on.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::compositor::DisplayConfig;
use crate::strategy::{Mode, Strategy};

/// Whether the screen is currently showing its real content or the blackout.
/// Raw values match the bus property encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityStatus {
    Visible = 0,
    Hidden = 1,
}

impl VisibilityStatus {
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

type ChangeCallback = Box<dyn Fn(VisibilityStatus)>;

/// The long-running feature core: current status plus the strategy doing the
/// actual compositor work. One instance per activation, torn down exactly
/// once at deactivation.
pub struct Shield {
    status: Rc<Cell<VisibilityStatus>>,
    strategy: Box<dyn Strategy>,
    on_change: Option<ChangeCallback>,
}

impl Shield {
    /// Build the shield in the initial `Visible` state with the strategy
    /// selected by `mode`. The status cell is shared with the strategy so
    /// its cursor callback can consult it without a back-reference.
    pub fn new(mode: Mode, config: DisplayConfig) -> Self {
        let status = Rc::new(Cell::new(VisibilityStatus::Visible));
        let strategy = mode.build(config, Rc::clone(&status));
        Self {
            status,
            strategy,
            on_change: None,
        }
    }

    /// Install the status-change notification target. Fired after every
    /// status mutation, never on reads or reconfiguration.
    pub fn set_on_change(&mut self, callback: ChangeCallback) {
        self.on_change = Some(callback);
    }

    /// Drop the notification target (used before the control surface is
    /// released so the callback cannot outlive it).
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    pub fn status(&self) -> VisibilityStatus {
        let status = self.status.get();
        trace!(?status, "status read");
        status
    }

    /// Obscure the screen and hide the pointer. No-op when already hidden.
    pub fn hide(&mut self) {
        if self.status.get() == VisibilityStatus::Hidden {
            debug!("hide requested while already hidden");
            return;
        }
        self.strategy.hide_transition();
        self.status.set(VisibilityStatus::Hidden);
        self.emit();
    }

    /// Restore the screen. No-op when already visible.
    pub fn reveal(&mut self) {
        if self.status.get() == VisibilityStatus::Visible {
            debug!("reveal requested while already visible");
            return;
        }
        self.strategy.reveal_transition();
        self.status.set(VisibilityStatus::Visible);
        self.emit();
    }

    /// Flip to the opposite state. Always performs a transition and always
    /// notifies, so callers that do not track status themselves get a
    /// confirmation per call.
    pub fn toggle(&mut self) {
        match self.status.get() {
            VisibilityStatus::Visible => {
                self.strategy.hide_transition();
                self.status.set(VisibilityStatus::Hidden);
            }
            VisibilityStatus::Hidden => {
                self.strategy.reveal_transition();
                self.status.set(VisibilityStatus::Visible);
            }
        }
        self.emit();
    }

    /// Rebind the strategy to a new display configuration after a topology
    /// change. Status is preserved and no notification is emitted; the
    /// strategy releases every old resource and re-arms against the new
    /// handles to match the current status.
    pub fn reconfigure(&mut self, config: DisplayConfig) {
        debug!(status = ?self.status.get(), "reconfiguring after topology change");
        self.strategy.reconfigure(config);
    }

    /// Release all compositor resources, restoring the screen and cursor
    /// regardless of current status.
    pub fn teardown(&mut self) {
        self.strategy.teardown();
    }

    fn emit(&self) {
        if let Some(callback) = &self.on_change {
            callback(self.status.get());
        }
    }
}
