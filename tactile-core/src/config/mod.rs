//! Configuration types
//!
//! Board-agnostic button configuration, parsed from a TOML subset or
//! stored as postcard binary data.

pub mod parser;
pub mod types;

pub use parser::{parse_config, ParseError};
pub use types::*;
