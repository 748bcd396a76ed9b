// Transition strategies.
//
// Both strategies perform the same three compositor operations — disable
// unredirect, attach the obscuring effect, suppress the cursor — but differ
// in when: Regular pays the full cost at each hide/reveal and is free while
// visible; LowLatency keeps the expensive parts armed for the whole
// activation so each hide/reveal only flips the effect.

mod low_latency;
mod regular;

pub use low_latency::LowLatency;
pub use regular::Regular;

use std::cell::Cell;
use std::rc::Rc;

use tracing::warn;

use crate::compositor::DisplayConfig;
use crate::shield::VisibilityStatus;

/// The transition contract a strategy fulfills for the shield. Lifecycle:
/// built once at activation, `reconfigure`d in place zero or more times,
/// `teardown`n exactly once.
pub trait Strategy {
    fn hide_transition(&mut self);
    fn reveal_transition(&mut self);
    fn reconfigure(&mut self, config: DisplayConfig);
    fn teardown(&mut self);
}

/// Which strategy the feature runs with. Raw values match the settings
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Regular = 0,
    LowLatency = 1,
}

impl Mode {
    /// Decode the settings value. Unknown values fall back to `Regular`
    /// rather than failing activation.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Mode::Regular,
            1 => Mode::LowLatency,
            other => {
                warn!(mode = other, "unknown mode value, falling back to Regular");
                Mode::Regular
            }
        }
    }

    pub(crate) fn build(
        self,
        config: DisplayConfig,
        status: Rc<Cell<VisibilityStatus>>,
    ) -> Box<dyn Strategy> {
        match self {
            Mode::Regular => Box::new(Regular::new(config, status)),
            Mode::LowLatency => Box::new(LowLatency::new(config, status)),
        }
    }
}
