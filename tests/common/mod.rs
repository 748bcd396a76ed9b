// Fake compositor capabilities for exercising the strategies without a
// real display server. Every fake records enough to assert which resources
// are armed, attached or subscribed at any point.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use screenveil::compositor::{
    CursorSubscription, CursorTracker, DisplayConfig, ObscuringEffect, RedirectionControl,
    StageRoot,
};

#[derive(Default)]
pub struct FakeStage {
    pub attached: RefCell<Vec<u64>>,
    pub attach_count: Cell<u32>,
}

impl StageRoot for FakeStage {
    fn add_effect(&self, effect: &ObscuringEffect) {
        self.attach_count.set(self.attach_count.get() + 1);
        self.attached.borrow_mut().push(effect.id());
    }

    fn remove_effect(&self, effect: &ObscuringEffect) {
        self.attached.borrow_mut().retain(|id| *id != effect.id());
    }
}

impl FakeStage {
    pub fn has_effect(&self) -> bool {
        !self.attached.borrow().is_empty()
    }
}

pub struct FakeRedirection {
    pub unredirect_enabled: Cell<bool>,
    pub disable_calls: Cell<u32>,
}

impl Default for FakeRedirection {
    fn default() -> Self {
        // Unredirect is the compositor's default state.
        Self {
            unredirect_enabled: Cell::new(true),
            disable_calls: Cell::new(0),
        }
    }
}

impl RedirectionControl for FakeRedirection {
    fn disable_unredirect(&self) {
        self.disable_calls.set(self.disable_calls.get() + 1);
        self.unredirect_enabled.set(false);
    }

    fn enable_unredirect(&self) {
        self.unredirect_enabled.set(true);
    }
}

pub struct FakeCursor {
    visible: Cell<bool>,
    pub force_invisible_calls: Cell<u32>,
    next_id: Cell<u64>,
    callbacks: RefCell<HashMap<u64, Rc<dyn Fn(bool)>>>,
}

impl Default for FakeCursor {
    fn default() -> Self {
        Self {
            visible: Cell::new(true),
            force_invisible_calls: Cell::new(0),
            next_id: Cell::new(0),
            callbacks: RefCell::new(HashMap::new()),
        }
    }
}

impl CursorTracker for FakeCursor {
    fn set_pointer_visible(&self, visible: bool) {
        if !visible {
            self.force_invisible_calls
                .set(self.force_invisible_calls.get() + 1);
        }
        self.visible.set(visible);
    }

    fn pointer_visible(&self) -> bool {
        self.visible.get()
    }

    fn connect_visibility_changed(&self, callback: Rc<dyn Fn(bool)>) -> CursorSubscription {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.callbacks.borrow_mut().insert(id, callback);
        CursorSubscription(id)
    }

    fn disconnect_visibility_changed(&self, subscription: CursorSubscription) {
        let removed = self.callbacks.borrow_mut().remove(&subscription.0);
        assert!(removed.is_some(), "disconnect of unknown cursor subscription");
    }
}

impl FakeCursor {
    pub fn subscriber_count(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Some other component forces the pointer visible: flip the flag and
    /// fire every live visibility-changed callback, as the tracker would.
    pub fn show_pointer_externally(&self) {
        self.visible.set(true);
        let callbacks: Vec<_> = self.callbacks.borrow().values().cloned().collect();
        for callback in callbacks {
            callback(true);
        }
    }
}

/// One fake display topology: a stage root, a redirection control and a
/// cursor tracker, with a `config()` bundle for the core.
pub struct FakeDisplay {
    pub stage: Rc<FakeStage>,
    pub redirection: Rc<FakeRedirection>,
    pub cursor: Rc<FakeCursor>,
}

impl FakeDisplay {
    pub fn new() -> Self {
        Self {
            stage: Rc::new(FakeStage::default()),
            redirection: Rc::new(FakeRedirection::default()),
            cursor: Rc::new(FakeCursor::default()),
        }
    }

    pub fn config(&self) -> DisplayConfig {
        DisplayConfig::new(
            Rc::clone(&self.stage) as Rc<dyn StageRoot>,
            Rc::clone(&self.redirection) as Rc<dyn RedirectionControl>,
            Rc::clone(&self.cursor) as Rc<dyn CursorTracker>,
        )
    }
}
