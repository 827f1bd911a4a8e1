//! Simple TOML parser for button configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! button configuration. It does NOT support the full TOML spec and needs
//! no allocator.
//!
//! Supported features:
//! - `[button NAME]` and `[button.NAME]` section headers
//! - Key = value pairs (string, integer)
//! - Comments (# ...)
//!
//! ```toml
//! [button.a]
//! pin = "^gpio39"
//! debounce_ms = 20
//! held_ms = 1500
//! ```

use core::fmt;

use tactile_hal::parse_pin_string;

use super::types::{InputConfig, LineConfig, PinConfig, MAX_LABEL_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Key not valid in this section
    UnknownKey,
    /// Too many buttons (exceeded heapless capacity)
    TooManyItems,
    /// Invalid pin string
    InvalidPin,
    /// Button section without a `pin` key
    MissingPin,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseError::InvalidSection => "invalid section header",
            ParseError::InvalidValue => "invalid value",
            ParseError::UnknownKey => "unknown key",
            ParseError::TooManyItems => "too many buttons",
            ParseError::InvalidPin => "invalid pin string",
            ParseError::MissingPin => "button has no pin",
        };
        f.write_str(msg)
    }
}

/// Button section being built
struct Pending {
    line: LineConfig,
    has_pin: bool,
}

/// Parse TOML configuration into InputConfig
pub fn parse_config(input: &str) -> Result<InputConfig, ParseError> {
    let mut config = InputConfig::new();
    let mut current: Option<Pending> = None;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            save_section(&mut config, current.take())?;

            let label = parse_section_header(&line[1..line.len() - 1])?;
            current = Some(Pending {
                line: LineConfig::new(label, PinConfig::default()),
                has_pin: false,
            });
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        let pending = current.as_mut().ok_or(ParseError::UnknownKey)?;
        apply_value(pending, key, value)?;
    }

    // Save final section
    save_section(&mut config, current)?;

    debug!("parsed {} button(s)", config.lines.len());
    Ok(config)
}

/// Parse section header like "button a" or "button.a", returning the label
fn parse_section_header(header: &str) -> Result<&str, ParseError> {
    let header = header.trim();

    let label = header
        .strip_prefix("button.")
        .or_else(|| header.strip_prefix("button "))
        .map(str::trim)
        .ok_or(ParseError::InvalidSection)?;

    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return Err(ParseError::InvalidSection);
    }
    Ok(label)
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a label value; over-long labels are rejected, not truncated
fn parse_label(value: &str) -> Result<heapless::String<MAX_LABEL_LEN>, ParseError> {
    let label = parse_string(value);
    if label.is_empty() {
        return Err(ParseError::InvalidValue);
    }
    let mut out = heapless::String::new();
    out.push_str(label).map_err(|_| ParseError::InvalidValue)?;
    Ok(out)
}

/// Parse a pin string like "gpio39", "!gpio12", "^gpio4"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let parsed = parse_pin_string(parse_string(value)).ok_or(ParseError::InvalidPin)?;
    Ok(PinConfig {
        pin: parsed.pin,
        inverted: parsed.inverted,
        pull_up: parsed.pull_up,
    })
}

fn apply_value(pending: &mut Pending, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "pin" => {
            pending.line.pin = parse_pin(value)?;
            pending.has_pin = true;
        }
        "debounce_ms" => pending.line.debounce_ms = parse_int(value)?,
        "held_ms" | "held_threshold_ms" => pending.line.held_threshold_ms = parse_int(value)?,
        "label" => pending.line.label = parse_label(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn save_section(config: &mut InputConfig, pending: Option<Pending>) -> Result<(), ParseError> {
    let Some(pending) = pending else {
        return Ok(());
    };
    if !pending.has_pin {
        return Err(ParseError::MissingPin);
    }
    config
        .lines
        .push(pending.line)
        .map_err(|_| ParseError::TooManyItems)
}
