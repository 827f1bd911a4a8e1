//! Input registry
//!
//! Owns every [`InputLine`] in a fixed-capacity arena. A [`LineId`] is a
//! slot index plus the slot's generation. Releasing a line bumps the
//! generation, so the slot can be reused while ids handed out for the old
//! line stop resolving.
//!
//! Interrupt glue holds only a `LineId` (or a pin number) and calls
//! [`InputRegistry::handle_edge`]; it never keeps a reference into a line.

use core::fmt;

use heapless::Vec;
use tactile_hal::{EdgePin, MonotonicClock, OwnershipError, PinError, SharedPinOwnership};

use super::button::Button;
use super::events::ButtonEvent;
use super::line::InputLine;
use crate::config::{InputConfig, LineConfig, PinConfig};

/// Owner label used in the pin ownership table
pub const DEFAULT_OWNER: &str = "input";

/// Handle to a registered line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineId {
    index: usize,
    generation: u32,
}

impl LineId {
    /// Slot index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Slot generation at registration time
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Pin could not be configured
    Pin(PinError),
    /// Pin already owned elsewhere
    Ownership(OwnershipError),
    /// No free slot
    Full,
    /// Id does not name a live line
    UnknownLine(LineId),
}

impl From<PinError> for RegistryError {
    fn from(e: PinError) -> Self {
        RegistryError::Pin(e)
    }
}

impl From<OwnershipError> for RegistryError {
    fn from(e: OwnershipError) -> Self {
        RegistryError::Ownership(e)
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Pin(e) => write!(f, "{}", e),
            RegistryError::Ownership(e) => write!(f, "{}", e),
            RegistryError::Full => f.write_str("input registry full"),
            RegistryError::UnknownLine(id) => {
                write!(f, "no input line {}.{}", id.index, id.generation)
            }
        }
    }
}

struct Slot<P> {
    generation: u32,
    line: Option<InputLine<P>>,
}

impl<P> Slot<P> {
    fn id(&self, index: usize) -> LineId {
        LineId {
            index,
            generation: self.generation,
        }
    }
}

/// Collection of debounced input lines sharing one clock
pub struct InputRegistry<'a, P, C, const N: usize> {
    lines: Vec<Slot<P>, N>,
    ownership: &'a SharedPinOwnership,
    owner: &'static str,
    clock: C,
}

impl<'a, P, C, const N: usize> InputRegistry<'a, P, C, N>
where
    P: EdgePin,
    C: MonotonicClock,
{
    /// Create an empty registry that claims pins under [`DEFAULT_OWNER`]
    pub fn new(clock: C, ownership: &'a SharedPinOwnership) -> Self {
        Self::with_owner(clock, ownership, DEFAULT_OWNER)
    }

    /// Create an empty registry that claims pins under `owner`
    pub fn with_owner(clock: C, ownership: &'a SharedPinOwnership, owner: &'static str) -> Self {
        Self {
            lines: Vec::new(),
            ownership,
            owner,
            clock,
        }
    }

    /// Register a button with the default debounce window
    pub fn register(&mut self, pin: P) -> Result<LineId, RegistryError> {
        self.insert(pin, InputLine::with_default_debounce)
    }

    /// Register a button from configuration
    pub fn register_with(&mut self, pin: P, config: &LineConfig) -> Result<LineId, RegistryError> {
        self.insert(pin, |pin| InputLine::with_config(pin, config))
    }

    /// Register every button in `config`
    ///
    /// `make_pin` turns a pin description into a board pin. Stops at the
    /// first failure; lines registered before it stay registered.
    pub fn register_all<F>(
        &mut self,
        config: &InputConfig,
        mut make_pin: F,
    ) -> Result<Vec<LineId, N>, RegistryError>
    where
        F: FnMut(&PinConfig) -> Result<P, PinError>,
    {
        let mut ids = Vec::new();
        for line in &config.lines {
            let pin = make_pin(&line.pin)?;
            let id = self.register_with(pin, line)?;
            ids.push(id).map_err(|_| RegistryError::Full)?;
        }
        Ok(ids)
    }

    fn insert<F>(&mut self, pin: P, build: F) -> Result<LineId, RegistryError>
    where
        F: FnOnce(P) -> Result<InputLine<P>, PinError>,
    {
        let free = self.lines.iter().position(|slot| slot.line.is_none());
        if free.is_none() && self.lines.is_full() {
            return Err(RegistryError::Full);
        }

        let pin_id = pin.id();
        if let Err(e) = self.ownership.acquire(pin_id, self.owner) {
            warn!("gpio{}: cannot register: {}", pin_id, e);
            return Err(e.into());
        }

        let line = match build(pin) {
            Ok(line) => line,
            Err(e) => {
                let _ = self.ownership.release(pin_id, self.owner);
                return Err(e.into());
            }
        };

        let id = match free {
            Some(index) => {
                let slot = &mut self.lines[index];
                slot.line = Some(line);
                slot.id(index)
            }
            None => {
                let slot = Slot {
                    generation: 0,
                    line: Some(line),
                };
                let id = slot.id(self.lines.len());
                if self.lines.push(slot).is_err() {
                    let _ = self.ownership.release(pin_id, self.owner);
                    return Err(RegistryError::Full);
                }
                id
            }
        };
        debug!("gpio{}: registered as line {}", pin_id, id.index);
        Ok(id)
    }

    /// Remove a line and hand its pin back
    ///
    /// The slot becomes free for the next registration; `id` and any copy
    /// of it no longer resolve.
    pub fn release(&mut self, id: LineId) -> Result<P, RegistryError> {
        let slot = self
            .lines
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .ok_or(RegistryError::UnknownLine(id))?;
        let line = slot.line.take().ok_or(RegistryError::UnknownLine(id))?;
        slot.generation = slot.generation.wrapping_add(1);

        let pin_id = line.pin_id();
        if let Err(e) = self.ownership.release(pin_id, self.owner) {
            warn!("gpio{}: ownership release failed: {}", pin_id, e);
        }
        debug!("gpio{}: line {} released", pin_id, id.index);
        Ok(line.into_pin())
    }

    /// Edge interrupt entry point for a line
    pub fn handle_edge(&self, id: LineId) -> Option<ButtonEvent> {
        let line = self.line(id)?;
        line.on_edge(self.clock.now_ms())
    }

    /// Edge interrupt entry point keyed by hardware pin number
    pub fn handle_pin_edge(&self, pin_id: u8) -> Option<ButtonEvent> {
        let id = self.find_pin(pin_id)?;
        self.handle_edge(id)
    }

    /// Clock-bound handle for application code
    pub fn button(&self, id: LineId) -> Option<Button<'_, P, C>> {
        self.line(id).map(|line| Button::new(line, &self.clock))
    }
}

impl<'a, P, C, const N: usize> InputRegistry<'a, P, C, N> {
    pub fn line(&self, id: LineId) -> Option<&InputLine<P>> {
        let slot = self.lines.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.line.as_ref()
    }

    /// Look a line up by label
    pub fn find(&self, label: &str) -> Option<LineId> {
        self.iter()
            .find(|(_, line)| line.label() == label)
            .map(|(id, _)| id)
    }

    /// Look a line up by pin number
    pub fn find_pin(&self, pin_id: u8) -> Option<LineId> {
        self.iter()
            .find(|(_, line)| line.pin_id() == pin_id)
            .map(|(id, _)| id)
    }

    /// Live lines in slot order
    pub fn iter(&self) -> impl Iterator<Item = (LineId, &InputLine<P>)> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.line.as_ref().map(|line| (slot.id(i), line)))
    }

    /// Number of live lines
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Clear latched bits and callbacks on every line
    ///
    /// Debounce windows, held thresholds and press state are kept, so the
    /// hardware wiring survives.
    pub fn clear_all(&self) {
        for (_, line) in self.iter() {
            line.reset_events();
        }
    }

    /// Consume every latched bit on every line
    ///
    /// Calls `f` once per consumed bit, in line order and then
    /// press / release / held-for order within a line.
    pub fn drain_events<F>(&self, mut f: F)
    where
        F: FnMut(LineId, ButtonEvent),
    {
        for (id, line) in self.iter() {
            for event in ButtonEvent::ALL {
                if line.take(event.flag()) {
                    f(id, event);
                }
            }
        }
    }
}

impl<'a, P, C, const N: usize> Drop for InputRegistry<'a, P, C, N> {
    fn drop(&mut self) {
        for line in self.lines.iter().filter_map(|slot| slot.line.as_ref()) {
            let _ = self.ownership.release(line.pin_id(), self.owner);
        }
    }
}
