//! Host test doubles for pins and clocks

use portable_atomic::{AtomicBool, AtomicU32, Ordering};
use tactile_hal::{EdgePin, EdgeTrigger, InputMode, InputPin, MonotonicClock, PinError};

/// Button pin with a settable level
///
/// Idles high, like a button pulled up to the supply.
pub struct MockPin {
    id: u8,
    level: AtomicBool,
    valid: bool,
    mode: Option<InputMode>,
    trigger: Option<EdgeTrigger>,
}

impl MockPin {
    pub fn new(id: u8) -> Self {
        Self {
            id,
            level: AtomicBool::new(true),
            valid: true,
            mode: None,
            trigger: None,
        }
    }

    /// Pin whose `init` fails
    pub fn invalid(id: u8) -> Self {
        Self {
            valid: false,
            ..Self::new(id)
        }
    }

    /// Pull the pin low
    pub fn press(&self) {
        self.level.store(false, Ordering::SeqCst);
    }

    /// Let the pin go high
    pub fn release(&self) {
        self.level.store(true, Ordering::SeqCst);
    }

    pub fn mode(&self) -> Option<InputMode> {
        self.mode
    }

    pub fn trigger(&self) -> Option<EdgeTrigger> {
        self.trigger
    }
}

impl InputPin for MockPin {
    fn is_high(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }
}

impl EdgePin for MockPin {
    fn id(&self) -> u8 {
        self.id
    }

    fn init(&mut self, mode: InputMode, trigger: EdgeTrigger) -> Result<(), PinError> {
        if !self.valid {
            return Err(PinError::InvalidPin(self.id));
        }
        self.mode = Some(mode);
        self.trigger = Some(trigger);
        Ok(())
    }
}

/// Clock moved by hand
#[derive(Default)]
pub struct ManualClock {
    now: AtomicU32,
}

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self {
            now: AtomicU32::new(start_ms),
        }
    }

    pub fn set(&self, ms: u32) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u32) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl MonotonicClock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.load(Ordering::SeqCst)
    }
}
