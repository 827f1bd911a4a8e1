//! Board-agnostic button event core
//!
//! This crate turns raw edge interrupts from push buttons into debounced,
//! latched events. It does not depend on any specific chip:
//!
//! - Debounced input lines with press / release / held-for latching
//! - Registry owning lines by stable id, with bulk reset
//! - Configuration types and a TOML subset parser
//!
//! Pins and clocks come from the traits in `tactile-hal`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod input;

#[cfg(test)]
pub(crate) mod testing;

pub use input::{Button, ButtonEvent, EventFlags, InputLine, InputRegistry, LineId, RegistryError};
