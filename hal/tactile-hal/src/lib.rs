//! Tactile Hardware Abstraction Layer
//!
//! This crate defines the contracts the button core consumes from the
//! board: a digital input pin that can be armed for edge interrupts, and a
//! wrapping millisecond clock. Chip-specific code implements these traits;
//! the core never touches registers directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (polling loop / callbacks) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tactile-core (lines, registry)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tactile-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │ embedded-hal  │
//! │  glue         │       │ 1.0 adapter   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::EdgePin`] - Digital input with edge triggers
//! - [`clock::MonotonicClock`] - Wrapping millisecond time source
//! - [`ownership::PinOwnership`] - Pin-to-owner table

#![no_std]
#![deny(unsafe_code)]

pub mod adapter;
pub mod clock;
pub mod gpio;
pub mod ownership;

// Re-export key traits at crate root for convenience
pub use adapter::EmbeddedHalInput;
pub use clock::{elapsed_ms, MonotonicClock};
pub use gpio::{EdgePin, EdgeTrigger, InputMode, InputPin, PinError};
pub use ownership::{
    parse_pin_string, OwnershipError, PinOwnership, PinString, SharedPinOwnership,
};
