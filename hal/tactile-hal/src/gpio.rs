//! GPIO pin abstractions
//!
//! Provides traits for digital input pins that can be armed for edge
//! interrupts. Chip-specific HALs implement these.

use core::fmt;

use bitflags::bitflags;

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input pin that can raise an interrupt on electrical transitions
///
/// The interrupt glue is expected to call back into the owner of the pin
/// (usually an input registry) whenever a configured edge fires. The pin
/// itself does not store the handler.
pub trait EdgePin: InputPin {
    /// Hardware pin number
    fn id(&self) -> u8;

    /// Configure the pin as an input and arm the given edge triggers
    ///
    /// Returns [`PinError::InvalidPin`] if this pin number cannot be used
    /// as an interrupt-capable input.
    fn init(&mut self, mode: InputMode, trigger: EdgeTrigger) -> Result<(), PinError>;
}

/// Input bias configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    /// No internal bias (external pull resistor fitted)
    #[default]
    Floating,
    /// Internal pull-up enabled
    PullUp,
    /// Internal pull-down enabled
    PullDown,
}

bitflags! {
    /// Edges on which a pin raises its interrupt
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EdgeTrigger: u8 {
        /// Low to high transition
        const RISING = 0x01;
        /// High to low transition
        const FALLING = 0x02;
        /// Both transitions
        const BOTH = Self::RISING.bits() | Self::FALLING.bits();
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EdgeTrigger {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EdgeTrigger({=u8:#x})", self.bits());
    }
}

/// Pin configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number does not exist or cannot take interrupts
    InvalidPin(u8),
    /// Requested mode or trigger is not supported by the hardware
    Unsupported,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinError::InvalidPin(pin) => write!(f, "invalid input pin gpio{}", pin),
            PinError::Unsupported => f.write_str("unsupported pin configuration"),
        }
    }
}
