//! Pin ownership tracking
//!
//! Tracks which subsystem currently owns each GPIO so that a second driver
//! cannot silently reconfigure a pin that is already wired to something
//! else. Conflicts are reported, never resolved by tearing down the
//! current owner.

use core::cell::RefCell;
use core::fmt;

use critical_section::Mutex;

/// Upper bound on pin numbers the table can track
pub const MAX_PINS: usize = 64;

/// Default GPIO count (ESP32-class parts expose GPIO0..=39)
pub const DEFAULT_PIN_COUNT: u8 = 40;

/// Ownership errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OwnershipError {
    /// Pin number is outside the table
    InvalidPin(u8),
    /// Pin is already claimed
    InUse {
        pin: u8,
        owner: &'static str,
    },
    /// Release attempted by something that does not hold the pin
    NotOwner(u8),
}

impl fmt::Display for OwnershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnershipError::InvalidPin(pin) => write!(f, "gpio{} does not exist", pin),
            OwnershipError::InUse { pin, owner } => {
                write!(f, "gpio{} already owned by {}", pin, owner)
            }
            OwnershipError::NotOwner(pin) => write!(f, "gpio{} not owned by caller", pin),
        }
    }
}

/// Pin-to-owner table
#[derive(Debug, Clone)]
pub struct PinOwnership {
    owners: [Option<&'static str>; MAX_PINS],
    pin_count: u8,
}

impl Default for PinOwnership {
    fn default() -> Self {
        Self::new(DEFAULT_PIN_COUNT)
    }
}

impl PinOwnership {
    /// Create an empty table for a part with `pin_count` GPIOs
    ///
    /// `pin_count` is clamped to [`MAX_PINS`].
    pub const fn new(pin_count: u8) -> Self {
        let pin_count = if pin_count as usize > MAX_PINS {
            MAX_PINS as u8
        } else {
            pin_count
        };
        Self {
            owners: [None; MAX_PINS],
            pin_count,
        }
    }

    /// Number of pins this table accepts
    pub fn pin_count(&self) -> u8 {
        self.pin_count
    }

    /// Claim a pin for `owner`
    ///
    /// Fails if the pin is claimed at all, including by `owner` itself. Two
    /// drivers sharing an owner label are still two drivers.
    pub fn acquire(&mut self, pin: u8, owner: &'static str) -> Result<(), OwnershipError> {
        if pin >= self.pin_count {
            return Err(OwnershipError::InvalidPin(pin));
        }
        match self.owners[pin as usize] {
            Some(current) => Err(OwnershipError::InUse {
                pin,
                owner: current,
            }),
            None => {
                self.owners[pin as usize] = Some(owner);
                Ok(())
            }
        }
    }

    /// Give a pin back
    pub fn release(&mut self, pin: u8, owner: &'static str) -> Result<(), OwnershipError> {
        if pin >= self.pin_count {
            return Err(OwnershipError::InvalidPin(pin));
        }
        match self.owners[pin as usize] {
            Some(current) if current == owner => {
                self.owners[pin as usize] = None;
                Ok(())
            }
            _ => Err(OwnershipError::NotOwner(pin)),
        }
    }

    /// Current owner of a pin, if any
    pub fn owner(&self, pin: u8) -> Option<&'static str> {
        self.owners.get(pin as usize).copied().flatten()
    }

    /// Check if a pin is claimed
    pub fn is_owned(&self, pin: u8) -> bool {
        self.owner(pin).is_some()
    }

    /// Get the number of claimed pins
    pub fn owned_count(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }
}

/// Ownership table that can live in a `static`
///
/// Every access runs inside a critical section, so drivers initialised
/// from different contexts see one consistent table.
pub struct SharedPinOwnership {
    inner: Mutex<RefCell<PinOwnership>>,
}

impl Default for SharedPinOwnership {
    fn default() -> Self {
        Self::new(DEFAULT_PIN_COUNT)
    }
}

impl SharedPinOwnership {
    pub const fn new(pin_count: u8) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(PinOwnership::new(pin_count))),
        }
    }

    pub fn acquire(&self, pin: u8, owner: &'static str) -> Result<(), OwnershipError> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).acquire(pin, owner))
    }

    pub fn release(&self, pin: u8, owner: &'static str) -> Result<(), OwnershipError> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).release(pin, owner))
    }

    pub fn owner(&self, pin: u8) -> Option<&'static str> {
        critical_section::with(|cs| self.inner.borrow_ref(cs).owner(pin))
    }

    pub fn is_owned(&self, pin: u8) -> bool {
        self.owner(pin).is_some()
    }
}

/// Pin string parsed from board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinString {
    pub pin: u8,
    /// `!` prefix: active-low
    pub inverted: bool,
    /// `^` prefix: enable pull-up
    pub pull_up: bool,
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio39" -> pin 39
/// - "!gpio39" -> pin 39, inverted (active-low)
/// - "^gpio37" -> pin 37, pull-up
///
/// Modifiers may be combined in any order ("^!gpio5").
pub fn parse_pin_string(s: &str) -> Option<PinString> {
    let mut s = s.trim();
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    if pin as usize >= MAX_PINS {
        return None;
    }

    Some(PinString {
        pin,
        inverted,
        pull_up,
    })
}
