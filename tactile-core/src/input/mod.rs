//! Debounced button input
//!
//! Edge interrupt → [`InputRegistry::handle_edge`] → [`InputLine::on_edge`]
//! (debounce, classify) → latched [`EventFlags`] and optional callbacks →
//! application polls through [`Button`] or [`InputLine`].

pub mod button;
pub mod events;
pub mod line;
pub mod registry;

pub use button::Button;
pub use events::{ButtonEvent, EventFlags};
pub use line::{Callback, InputLine};
pub use registry::{InputRegistry, LineId, RegistryError, DEFAULT_OWNER};
