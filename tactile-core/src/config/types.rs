//! Configuration type definitions
//!
//! These types describe which pins carry buttons and how each one is
//! debounced and classified.

use heapless::{String, Vec};
use tactile_hal::InputMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum buttons per config
pub const MAX_LINES: usize = 8;

/// Default debounce window (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 20;

/// Front panel button pins
pub const FRONT_PANEL_A_PIN: u8 = 39;
pub const FRONT_PANEL_B_PIN: u8 = 38;
pub const FRONT_PANEL_C_PIN: u8 = 37;

/// Pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Button reads high when pressed (normal wiring pulls to ground)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }

    /// Input bias to request from the HAL
    pub fn input_mode(&self) -> InputMode {
        if self.pull_up {
            InputMode::PullUp
        } else {
            InputMode::Floating
        }
    }
}

/// One button
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineConfig {
    /// Button name
    pub label: String<MAX_LABEL_LEN>,
    pub pin: PinConfig,
    /// Minimum gap between accepted presses (ms)
    pub debounce_ms: u32,
    /// Press duration after which a release counts as held-for (ms, 0 = off)
    pub held_threshold_ms: u32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            pin: PinConfig::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            held_threshold_ms: 0,
        }
    }
}

impl LineConfig {
    /// Create a config with default timing
    ///
    /// Labels longer than [`MAX_LABEL_LEN`] are truncated.
    pub fn new(label: &str, pin: PinConfig) -> Self {
        Self {
            label: truncate_label(label),
            pin,
            ..Self::default()
        }
    }
}

/// Copy a label into a bounded string, dropping what does not fit
pub fn truncate_label(label: &str) -> String<MAX_LABEL_LEN> {
    let mut s = String::new();
    for ch in label.chars() {
        if s.push(ch).is_err() {
            break;
        }
    }
    s
}

/// Complete button configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    pub lines: Vec<LineConfig, MAX_LINES>,
}

impl InputConfig {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    /// Three front panel buttons `a`, `b`, `c` on GPIO 39, 38, 37
    pub fn front_panel() -> Self {
        let mut config = Self::new();
        for (label, pin) in [
            ("a", FRONT_PANEL_A_PIN),
            ("b", FRONT_PANEL_B_PIN),
            ("c", FRONT_PANEL_C_PIN),
        ] {
            // Capacity is well above three
            let _ = config.lines.push(LineConfig::new(label, PinConfig::new(pin)));
        }
        config
    }

    /// Find a button by label
    pub fn find(&self, label: &str) -> Option<&LineConfig> {
        self.lines.iter().find(|l| l.label.as_str() == label)
    }
}

#[cfg(feature = "serde")]
pub use persist::*;

#[cfg(feature = "serde")]
mod persist {
    use core::fmt;

    use serde::{Deserialize, Serialize};

    use super::InputConfig;

    /// Magic number to identify stored button config
    pub const CONFIG_MAGIC: u32 = 0x4254_4e43; // "BTNC"

    /// Current stored config version
    pub const CONFIG_VERSION: u8 = 1;

    /// Config persistence errors
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum PersistError {
        /// Buffer too small or serializer failure
        Serialize,
        /// Deserialization failed
        Deserialize,
        /// Data does not start with [`CONFIG_MAGIC`]
        BadMagic,
        /// Stored with a different [`CONFIG_VERSION`]
        VersionMismatch,
    }

    impl fmt::Display for PersistError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                PersistError::Serialize => f.write_str("config serialization failed"),
                PersistError::Deserialize => f.write_str("config deserialization failed"),
                PersistError::BadMagic => f.write_str("stored config has bad magic"),
                PersistError::VersionMismatch => f.write_str("stored config version mismatch"),
            }
        }
    }

    #[derive(Serialize)]
    struct StoredRef<'a> {
        magic: u32,
        version: u8,
        config: &'a InputConfig,
    }

    #[derive(Deserialize)]
    struct Stored {
        magic: u32,
        version: u8,
        config: InputConfig,
    }

    impl InputConfig {
        /// Serialize into `buf`, returning the used prefix
        pub fn to_bytes<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], PersistError> {
            let stored = StoredRef {
                magic: CONFIG_MAGIC,
                version: CONFIG_VERSION,
                config: self,
            };
            postcard::to_slice(&stored, buf).map_err(|_| PersistError::Serialize)
        }

        /// Load from bytes written by [`to_bytes`](Self::to_bytes)
        pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
            let stored: Stored =
                postcard::from_bytes(bytes).map_err(|_| PersistError::Deserialize)?;
            if stored.magic != CONFIG_MAGIC {
                return Err(PersistError::BadMagic);
            }
            if stored.version != CONFIG_VERSION {
                return Err(PersistError::VersionMismatch);
            }
            Ok(stored.config)
        }
    }
}
