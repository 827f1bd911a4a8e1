//! Latched event bits and the events they stand for

use bitflags::bitflags;

bitflags! {
    /// Sticky event bits latched by the edge handler
    ///
    /// This is an accumulator, not a queue: two unconsumed presses leave a
    /// single `WAS_PRESSED` bit. Bit `0x01` is reserved for a live
    /// "is pressed" level and is never latched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// An accepted falling edge (press)
        const WAS_PRESSED = 0x02;
        /// An accepted rising edge after a press shorter than the held threshold
        const WAS_RELEASED = 0x04;
        /// A release that came after the held threshold elapsed
        const HELD_FOR_EXPIRED = 0x08;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EventFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EventFlags({=u8:#x})", self.bits());
    }
}

/// Classified button events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Button went down
    Pressed,
    /// Button came up after a short press
    Released,
    /// Button came up after being held past the threshold
    HeldFor,
}

impl ButtonEvent {
    /// All events, in the order they are drained
    pub const ALL: [ButtonEvent; 3] = [
        ButtonEvent::Pressed,
        ButtonEvent::Released,
        ButtonEvent::HeldFor,
    ];

    /// Latch bit for this event
    pub fn flag(self) -> EventFlags {
        match self {
            ButtonEvent::Pressed => EventFlags::WAS_PRESSED,
            ButtonEvent::Released => EventFlags::WAS_RELEASED,
            ButtonEvent::HeldFor => EventFlags::HELD_FOR_EXPIRED,
        }
    }

    /// Event for a single latch bit
    pub fn from_flag(flag: EventFlags) -> Option<Self> {
        if flag == EventFlags::WAS_PRESSED {
            Some(ButtonEvent::Pressed)
        } else if flag == EventFlags::WAS_RELEASED {
            Some(ButtonEvent::Released)
        } else if flag == EventFlags::HELD_FOR_EXPIRED {
            Some(ButtonEvent::HeldFor)
        } else {
            None
        }
    }

    /// Returns true for both kinds of release
    pub fn is_release(&self) -> bool {
        matches!(self, ButtonEvent::Released | ButtonEvent::HeldFor)
    }
}
