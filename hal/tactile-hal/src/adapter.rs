//! embedded-hal 1.0 adapter
//!
//! `embedded_hal::digital::InputPin` reads through `&mut self` and can fail,
//! while the button core reads pins through a shared reference from both
//! the interrupt handler and the application loop. The adapter serialises
//! access with a critical section.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::InputPin as EhInputPin;

use crate::gpio::{EdgePin, EdgeTrigger, InputMode, InputPin, PinError};

/// Wraps an already-configured embedded-hal input
///
/// The chip HAL is expected to have set bias and interrupt triggers when it
/// produced the pin, so [`EdgePin::init`] only records what was requested.
pub struct EmbeddedHalInput<T> {
    id: u8,
    pin: Mutex<RefCell<T>>,
    mode: InputMode,
    trigger: EdgeTrigger,
}

impl<T: EhInputPin> EmbeddedHalInput<T> {
    pub fn new(id: u8, pin: T) -> Self {
        Self {
            id,
            pin: Mutex::new(RefCell::new(pin)),
            mode: InputMode::Floating,
            trigger: EdgeTrigger::empty(),
        }
    }

    /// Mode requested by the last `init`
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Triggers requested by the last `init`
    pub fn trigger(&self) -> EdgeTrigger {
        self.trigger
    }

    /// Unwrap the inner pin
    pub fn into_inner(self) -> T {
        self.pin.into_inner().into_inner()
    }
}

impl<T: EhInputPin> InputPin for EmbeddedHalInput<T> {
    /// A failed read reports high, the idle level of a pulled-up button
    fn is_high(&self) -> bool {
        critical_section::with(|cs| self.pin.borrow_ref_mut(cs).is_high().unwrap_or(true))
    }
}

impl<T: EhInputPin> EdgePin for EmbeddedHalInput<T> {
    fn id(&self) -> u8 {
        self.id
    }

    fn init(&mut self, mode: InputMode, trigger: EdgeTrigger) -> Result<(), PinError> {
        if trigger.is_empty() {
            return Err(PinError::Unsupported);
        }
        self.mode = mode;
        self.trigger = trigger;
        Ok(())
    }
}
