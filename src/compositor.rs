// Host compositor capability surface.
//
// The compositor owns the actor graph, the unredirect machinery and the
// cursor tracker; this crate only ever talks to them through the traits
// below. Handles arrive bundled in a DisplayConfig, which the host rebuilds
// from scratch whenever the monitor topology changes — the core swaps the
// whole bundle and never patches a live one.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// The drawable root the obscuring effect is attached to (the compositor's
/// top-level stage or window group).
pub trait StageRoot {
    fn add_effect(&self, effect: &ObscuringEffect);
    fn remove_effect(&self, effect: &ObscuringEffect);
}

/// Control over the compositor's fullscreen-unredirect optimization. While
/// unredirect is possible, fullscreen content bypasses compositing and any
/// effect on the stage root is invisible for it.
pub trait RedirectionControl {
    fn disable_unredirect(&self);
    fn enable_unredirect(&self);
}

/// The compositor's pointer-cursor tracker. Visibility-change callbacks fire
/// on the host loop, never concurrently with other operations.
pub trait CursorTracker {
    fn set_pointer_visible(&self, visible: bool);
    fn pointer_visible(&self) -> bool;
    fn connect_visibility_changed(&self, callback: Rc<dyn Fn(bool)>) -> CursorSubscription;
    fn disconnect_visibility_changed(&self, subscription: CursorSubscription);
}

/// Monitor-topology change notifications.
pub trait MonitorManager {
    fn connect_changed(&self, callback: Box<dyn Fn()>) -> MonitorSubscription;
    fn disconnect_changed(&self, subscription: MonitorSubscription);
}

/// Live registration against the cursor tracker. Deliberately neither Copy
/// nor Clone: whoever subscribed must hand the handle back through
/// `disconnect_visibility_changed` on every exit path, or the tracker would
/// keep a dangling notification target.
pub struct CursorSubscription(pub u64);

impl fmt::Debug for CursorSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CursorSubscription({})", self.0)
    }
}

/// Live registration against the monitor manager. Same discipline as
/// [`CursorSubscription`].
pub struct MonitorSubscription(pub u64);

impl fmt::Debug for MonitorSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MonitorSubscription({})", self.0)
    }
}

/// The three host handles a strategy needs to do its work, bundled as one
/// value. Immutable once built; a new one is produced per topology change.
pub struct DisplayConfig {
    pub root: Rc<dyn StageRoot>,
    pub redirection: Rc<dyn RedirectionControl>,
    pub cursor: Rc<dyn CursorTracker>,
}

impl Clone for DisplayConfig {
    fn clone(&self) -> Self {
        Self {
            root: Rc::clone(&self.root),
            redirection: Rc::clone(&self.redirection),
            cursor: Rc::clone(&self.cursor),
        }
    }
}

impl DisplayConfig {
    pub fn new(
        root: Rc<dyn StageRoot>,
        redirection: Rc<dyn RedirectionControl>,
        cursor: Rc<dyn CursorTracker>,
    ) -> Self {
        Self {
            root,
            redirection,
            cursor,
        }
    }
}

static NEXT_EFFECT_ID: AtomicU64 = AtomicU64::new(1);

/// A brightness/contrast effect instance. One is created per strategy and
/// attached to / detached from the stage root as the cheap half of a
/// transition. The id gives the host a stable identity for attach/detach
/// pairing.
#[derive(Debug)]
pub struct ObscuringEffect {
    id: u64,
    pub brightness: (f64, f64, f64),
    pub contrast: (f64, f64, f64),
}

impl ObscuringEffect {
    /// Full blackout: brightness driven all the way down, contrast neutral.
    pub fn blackout() -> Self {
        Self {
            id: NEXT_EFFECT_ID.fetch_add(1, Ordering::Relaxed),
            brightness: (-1.0, -1.0, -1.0),
            contrast: (0.0, 0.0, 0.0),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}
