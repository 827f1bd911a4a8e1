//! Clock-bound view of a line
//!
//! [`Button`] pairs a line with the registry clock so application code can
//! ask "pressed for 2 seconds?" without threading timestamps around.

use tactile_hal::{EdgePin, MonotonicClock};

use super::events::EventFlags;
use super::line::{Callback, InputLine};

/// Application-side handle to a registered button
pub struct Button<'r, P, C> {
    line: &'r InputLine<P>,
    clock: &'r C,
}

impl<'r, P, C> Clone for Button<'r, P, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'r, P, C> Copy for Button<'r, P, C> {}

impl<'r, P: EdgePin, C: MonotonicClock> Button<'r, P, C> {
    pub(crate) fn new(line: &'r InputLine<P>, clock: &'r C) -> Self {
        Self { line, clock }
    }

    /// The underlying line
    pub fn line(&self) -> &'r InputLine<P> {
        self.line
    }

    pub fn label(&self) -> &'r str {
        self.line.label()
    }

    pub fn read(&self) -> bool {
        self.line.read()
    }

    pub fn is_pressed(&self) -> bool {
        self.line.is_pressed()
    }

    pub fn is_released(&self) -> bool {
        self.line.is_released()
    }

    pub fn was_pressed(&self) -> bool {
        self.line.was_pressed()
    }

    pub fn was_released(&self) -> bool {
        self.line.was_released()
    }

    /// Held right now, and for longer than `threshold_secs`
    pub fn pressed_for(&self, threshold_secs: f32) -> bool {
        self.line.pressed_for(threshold_secs, self.clock.now_ms())
    }

    pub fn pressed_for_ms(&self, threshold_ms: u32) -> bool {
        self.line.pressed_for_ms(threshold_ms, self.clock.now_ms())
    }

    /// Set the held threshold and consume a held-for release
    pub fn released_for(&self, threshold_secs: f32) -> bool {
        self.line.released_for(threshold_secs)
    }

    pub fn on_pressed(&self, callback: Callback) {
        self.line.on_pressed(callback);
    }

    pub fn on_released(&self, callback: Callback) {
        self.line.on_released(callback);
    }

    pub fn on_released_for(&self, threshold_secs: f32, callback: Callback) {
        self.line.on_released_for(threshold_secs, callback);
    }

    pub fn flags(&self) -> EventFlags {
        self.line.flags()
    }

    pub fn clear_flags(&self) {
        self.line.clear_flags();
    }
}
