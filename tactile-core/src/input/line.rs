//! Debounced input line
//!
//! One [`InputLine`] wraps one physical button pin. The edge handler
//! ([`InputLine::on_edge`]) runs in interrupt context and is the only
//! writer of the press state and the latched event bits. Everything else
//! is called from the application loop through `&self`.
//!
//! # Timing
//!
//! - A press (pin at pressed level) is accepted only if more than
//!   `debounce_ms` elapsed since the last edge of *either* direction. The
//!   debounce clock is restarted by every edge, accepted or not, so a
//!   release directly followed by a press can reject the press.
//! - A release is accepted whenever the line is held; there is no
//!   debounce on release.
//! - The first edge after construction is never debounced.
//!
//! # Held-for quirk
//!
//! When a release comes after the held threshold, the latched bits are
//! *replaced* by `HELD_FOR_EXPIRED`. A `WAS_PRESSED` bit from the same
//! press that was never consumed is lost, as is any older `WAS_RELEASED`.
//! Held-for is only decided at release time; holding past the threshold
//! does nothing on its own.

use core::cell::Cell;

use critical_section::Mutex;
use heapless::String;
use portable_atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use tactile_hal::{elapsed_ms, EdgePin, EdgeTrigger, InputMode, PinError};

use super::events::{ButtonEvent, EventFlags};
use crate::config::{LineConfig, DEFAULT_DEBOUNCE_MS, MAX_LABEL_LEN};

/// Event callback
///
/// Runs inside the edge interrupt. Keep it short and never wait on
/// anything that itself needs an interrupt to make progress.
pub type Callback = fn();

#[derive(Debug, Clone, Copy, Default)]
struct Callbacks {
    on_pressed: Option<Callback>,
    on_released: Option<Callback>,
    on_held_for: Option<Callback>,
}

/// Convert a threshold in seconds to milliseconds
///
/// Negative and NaN inputs become 0.
fn secs_to_ms(secs: f32) -> u32 {
    (secs * 1000.0) as u32
}

/// A debounced button on one pin
pub struct InputLine<P> {
    pin: P,
    pin_id: u8,
    label: String<MAX_LABEL_LEN>,
    /// Pressed level is high instead of low
    inverted: bool,
    debounce_ms: u32,
    /// 0 disables held-for classification
    held_threshold_ms: AtomicU32,
    last_edge_ms: AtomicU32,
    /// False until the first edge; the debounce clock is unset before it
    edge_seen: AtomicBool,
    held: AtomicBool,
    /// Valid only while `held`
    press_started_ms: AtomicU32,
    flags: AtomicU8,
    callbacks: Mutex<Cell<Callbacks>>,
}

impl<P: EdgePin> InputLine<P> {
    /// Create a line with the given debounce window
    ///
    /// Arms the pin for both rising and falling edges. Fails if the pin
    /// cannot be used as an interrupt input.
    pub fn new(pin: P, debounce_ms: u32) -> Result<Self, PinError> {
        Self::build(pin, InputMode::Floating, false, debounce_ms, 0, String::new())
    }

    /// Create a line with the default 20 ms debounce window
    pub fn with_default_debounce(pin: P) -> Result<Self, PinError> {
        Self::new(pin, DEFAULT_DEBOUNCE_MS)
    }

    /// Create a line from configuration
    ///
    /// The pin must be the one the configuration names.
    pub fn with_config(pin: P, config: &LineConfig) -> Result<Self, PinError> {
        if pin.id() != config.pin.pin {
            return Err(PinError::InvalidPin(config.pin.pin));
        }
        Self::build(
            pin,
            config.pin.input_mode(),
            config.pin.inverted,
            config.debounce_ms,
            config.held_threshold_ms,
            config.label.clone(),
        )
    }

    fn build(
        mut pin: P,
        mode: InputMode,
        inverted: bool,
        debounce_ms: u32,
        held_threshold_ms: u32,
        label: String<MAX_LABEL_LEN>,
    ) -> Result<Self, PinError> {
        pin.init(mode, EdgeTrigger::BOTH)?;
        Ok(Self {
            pin_id: pin.id(),
            pin,
            label,
            inverted,
            debounce_ms,
            held_threshold_ms: AtomicU32::new(held_threshold_ms),
            last_edge_ms: AtomicU32::new(0),
            edge_seen: AtomicBool::new(false),
            held: AtomicBool::new(false),
            press_started_ms: AtomicU32::new(0),
            flags: AtomicU8::new(0),
            callbacks: Mutex::new(Cell::new(Callbacks::default())),
        })
    }

    /// Edge handler
    ///
    /// Call from the pin's interrupt on any transition. Direction is taken
    /// from the live pin level, not from whichever trigger fired. Returns
    /// the event latched by this edge, or `None` if it was debounced away
    /// or was a release without a press.
    pub fn on_edge(&self, now_ms: u32) -> Option<ButtonEvent> {
        let event = if self.read() {
            self.handle_press(now_ms)
        } else {
            self.handle_release(now_ms)
        };

        self.last_edge_ms.store(now_ms, Ordering::Release);
        self.edge_seen.store(true, Ordering::Release);
        event
    }

    fn handle_press(&self, now_ms: u32) -> Option<ButtonEvent> {
        if self.edge_seen.load(Ordering::Acquire) {
            let since = elapsed_ms(now_ms, self.last_edge_ms.load(Ordering::Acquire));
            if since <= self.debounce_ms {
                trace!("gpio{}: press rejected ({} ms)", self.pin_id, since);
                return None;
            }
        }

        // Start time must be visible before `held` is
        self.press_started_ms.store(now_ms, Ordering::Release);
        self.held.store(true, Ordering::Release);
        self.flags
            .fetch_or(EventFlags::WAS_PRESSED.bits(), Ordering::AcqRel);
        trace!("gpio{}: pressed at {}", self.pin_id, now_ms);

        if let Some(cb) = self.callbacks().on_pressed {
            cb();
        }
        Some(ButtonEvent::Pressed)
    }

    fn handle_release(&self, now_ms: u32) -> Option<ButtonEvent> {
        if !self.held.swap(false, Ordering::AcqRel) {
            return None;
        }

        let threshold = self.held_threshold_ms.load(Ordering::Acquire);
        let duration = elapsed_ms(now_ms, self.press_started_ms.load(Ordering::Acquire));
        let callbacks = self.callbacks();

        if threshold > 0 && duration > threshold {
            self.flags
                .store(EventFlags::HELD_FOR_EXPIRED.bits(), Ordering::Release);
            trace!("gpio{}: held for {} ms", self.pin_id, duration);
            if let Some(cb) = callbacks.on_held_for {
                cb();
            }
            Some(ButtonEvent::HeldFor)
        } else {
            self.flags
                .fetch_or(EventFlags::WAS_RELEASED.bits(), Ordering::AcqRel);
            trace!("gpio{}: released after {} ms", self.pin_id, duration);
            if let Some(cb) = callbacks.on_released {
                cb();
            }
            Some(ButtonEvent::Released)
        }
    }

    /// Live pin read: true if the pin is at the pressed level now
    ///
    /// Does not look at debounced or latched state.
    pub fn read(&self) -> bool {
        self.pin.is_low() != self.inverted
    }

    /// Alias of [`read`](Self::read)
    pub fn is_pressed(&self) -> bool {
        self.read()
    }

    /// Negation of [`read`](Self::read)
    pub fn is_released(&self) -> bool {
        !self.read()
    }
}

impl<P> InputLine<P> {
    /// Borrow the underlying pin
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Hardware pin number
    pub fn pin_id(&self) -> u8 {
        self.pin_id
    }

    /// Give the pin back, dropping all line state
    pub fn into_pin(self) -> P {
        self.pin
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Debounced press state
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

    /// When the current press started, if the line is held
    pub fn press_started_ms(&self) -> Option<u32> {
        if self.is_held() {
            Some(self.press_started_ms.load(Ordering::Acquire))
        } else {
            None
        }
    }

    pub fn held_threshold_ms(&self) -> u32 {
        self.held_threshold_ms.load(Ordering::Acquire)
    }

    /// Set the held-for threshold; 0 disables it
    pub fn set_held_threshold_ms(&self, threshold_ms: u32) {
        self.held_threshold_ms.store(threshold_ms, Ordering::Release);
    }

    /// Snapshot of the latched bits, without consuming them
    pub fn flags(&self) -> EventFlags {
        EventFlags::from_bits_truncate(self.flags.load(Ordering::Acquire))
    }

    /// Read-and-clear one latched bit
    ///
    /// The clear is a single atomic AND, so a bit the handler sets between
    /// our read and our write cannot be lost.
    pub fn take(&self, flag: EventFlags) -> bool {
        let prev = self.flags.fetch_and(!flag.bits(), Ordering::AcqRel);
        prev & flag.bits() != 0
    }

    /// Consume a latched press
    pub fn was_pressed(&self) -> bool {
        self.take(EventFlags::WAS_PRESSED)
    }

    /// Consume a latched release
    pub fn was_released(&self) -> bool {
        self.take(EventFlags::WAS_RELEASED)
    }

    /// True if the line is held and has been for longer than `threshold_ms`
    ///
    /// Pure query; nothing is latched or cleared.
    pub fn pressed_for_ms(&self, threshold_ms: u32, now_ms: u32) -> bool {
        match self.press_started_ms() {
            Some(start) => elapsed_ms(now_ms, start) > threshold_ms,
            None => false,
        }
    }

    /// [`pressed_for_ms`](Self::pressed_for_ms) with a threshold in seconds
    pub fn pressed_for(&self, threshold_secs: f32, now_ms: u32) -> bool {
        self.pressed_for_ms(secs_to_ms(threshold_secs), now_ms)
    }

    /// Set the held threshold and consume a latched held-for release
    pub fn released_for_ms(&self, threshold_ms: u32) -> bool {
        self.set_held_threshold_ms(threshold_ms);
        self.take(EventFlags::HELD_FOR_EXPIRED)
    }

    /// [`released_for_ms`](Self::released_for_ms) with a threshold in seconds
    pub fn released_for(&self, threshold_secs: f32) -> bool {
        self.released_for_ms(secs_to_ms(threshold_secs))
    }

    /// Register the press callback, replacing any previous one
    pub fn on_pressed(&self, callback: Callback) {
        self.update_callbacks(|c| c.on_pressed = Some(callback));
    }

    /// Register the release callback, replacing any previous one
    pub fn on_released(&self, callback: Callback) {
        self.update_callbacks(|c| c.on_released = Some(callback));
    }

    /// Set the held threshold and register the held-for callback
    pub fn on_released_for(&self, threshold_secs: f32, callback: Callback) {
        self.on_released_for_ms(secs_to_ms(threshold_secs), callback);
    }

    pub fn on_released_for_ms(&self, threshold_ms: u32, callback: Callback) {
        self.set_held_threshold_ms(threshold_ms);
        self.update_callbacks(|c| c.on_held_for = Some(callback));
    }

    /// Unset all three callbacks
    pub fn clear_callbacks(&self) {
        self.update_callbacks(|c| *c = Callbacks::default());
    }

    /// Drop all latched bits
    pub fn clear_flags(&self) {
        self.flags.store(0, Ordering::Release);
    }

    /// Clear latched bits and callbacks
    ///
    /// Debounce window, held threshold and press state are kept.
    pub fn reset_events(&self) {
        critical_section::with(|cs| {
            self.flags.store(0, Ordering::Release);
            self.callbacks.borrow(cs).set(Callbacks::default());
        });
    }

    fn callbacks(&self) -> Callbacks {
        critical_section::with(|cs| self.callbacks.borrow(cs).get())
    }

    fn update_callbacks(&self, f: impl FnOnce(&mut Callbacks)) {
        critical_section::with(|cs| {
            let cell = self.callbacks.borrow(cs);
            let mut callbacks = cell.get();
            f(&mut callbacks);
            cell.set(callbacks);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PinConfig;
    use crate::testing::MockPin;

    fn line(debounce_ms: u32) -> InputLine<MockPin> {
        InputLine::new(MockPin::new(39), debounce_ms).unwrap()
    }

    fn fall(line: &InputLine<MockPin>, t: u32) -> Option<ButtonEvent> {
        line.pin().press();
        line.on_edge(t)
    }

    fn rise(line: &InputLine<MockPin>, t: u32) -> Option<ButtonEvent> {
        line.pin().release();
        line.on_edge(t)
    }

    #[test]
    fn test_new_arms_both_edges() {
        let line = line(20);
        assert_eq!(line.pin().trigger(), Some(EdgeTrigger::BOTH));
        assert_eq!(line.pin().mode(), Some(InputMode::Floating));
        assert_eq!(line.debounce_ms(), 20);
    }

    #[test]
    fn test_new_rejects_invalid_pin() {
        let result = InputLine::new(MockPin::invalid(99), 20);
        assert!(matches!(result, Err(PinError::InvalidPin(99))));
    }

    #[test]
    fn test_idle_defaults() {
        let line = line(20);
        assert!(!line.is_held());
        assert_eq!(line.press_started_ms(), None);
        assert!(line.flags().is_empty());
        assert!(!line.was_pressed());
        assert!(!line.was_released());
        assert!(!line.released_for(1.0));
        assert!(!line.pressed_for(0.0, 1000));
    }

    #[test]
    fn test_press_and_release() {
        let line = line(20);

        assert_eq!(fall(&line, 100), Some(ButtonEvent::Pressed));
        assert!(line.is_held());
        assert_eq!(line.press_started_ms(), Some(100));

        assert_eq!(rise(&line, 200), Some(ButtonEvent::Released));
        assert!(!line.is_held());
        assert_eq!(
            line.flags(),
            EventFlags::WAS_PRESSED | EventFlags::WAS_RELEASED
        );
    }

    #[test]
    fn test_flag_consumed_once() {
        let line = line(20);
        fall(&line, 100);

        assert!(line.was_pressed());
        assert!(!line.was_pressed());
    }

    #[test]
    fn test_consuming_one_bit_keeps_others() {
        let line = line(20);
        fall(&line, 100);
        rise(&line, 200);

        assert!(line.was_released());
        assert_eq!(line.flags(), EventFlags::WAS_PRESSED);
    }

    #[test]
    fn test_presses_accumulate_not_queue() {
        let line = line(20);
        fall(&line, 100);
        rise(&line, 200);
        fall(&line, 300);
        rise(&line, 400);

        assert!(line.was_pressed());
        assert!(!line.was_pressed());
    }

    #[test]
    fn test_bounce_within_window_rejected() {
        let line = line(20);
        assert!(fall(&line, 100).is_some());
        rise(&line, 105);
        // Falls inside the window of the previous edge
        assert_eq!(fall(&line, 110), None);
        assert_eq!(fall(&line, 125), None);
        // More than 20ms after the last edge at 125
        assert_eq!(fall(&line, 146), Some(ButtonEvent::Pressed));
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let line = line(20);
        fall(&line, 100);
        rise(&line, 200);
        assert_eq!(fall(&line, 220), None);
        rise(&line, 300);
        assert_eq!(fall(&line, 321), Some(ButtonEvent::Pressed));
    }

    #[test]
    fn test_spurious_release_is_noop() {
        static RELEASES: AtomicU32 = AtomicU32::new(0);
        fn on_release() {
            RELEASES.fetch_add(1, Ordering::Relaxed);
        }

        let line = line(20);
        line.on_released(on_release);

        assert_eq!(rise(&line, 100), None);
        assert!(line.flags().is_empty());
        assert_eq!(RELEASES.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_spurious_release_restarts_debounce() {
        let line = line(20);
        rise(&line, 100);
        assert_eq!(fall(&line, 110), None);
    }

    #[test]
    fn test_scenario_release_then_quick_repress() {
        // fall@0, rise@5, fall@10, rise@200 with threshold disabled
        let line = line(20);

        assert_eq!(fall(&line, 0), Some(ButtonEvent::Pressed));
        assert_eq!(rise(&line, 5), Some(ButtonEvent::Released));
        assert_eq!(fall(&line, 10), None);
        assert_eq!(rise(&line, 200), None);

        assert!(!line.is_held());
        assert!(line.was_pressed());
        assert!(line.was_released());
        assert!(line.flags().is_empty());
    }

    #[test]
    fn test_scenario_held_for() {
        let line = line(20);
        line.set_held_threshold_ms(500);

        fall(&line, 0);
        assert_eq!(line.flags(), EventFlags::WAS_PRESSED);
        assert_eq!(rise(&line, 600), Some(ButtonEvent::HeldFor));

        assert_eq!(line.flags(), EventFlags::HELD_FOR_EXPIRED);
        assert!(!line.was_pressed());
        assert!(!line.was_released());
        assert!(line.released_for(0.5));
        assert!(!line.released_for(0.5));
    }

    #[test]
    fn test_held_for_wipes_older_release() {
        let line = line(20);
        fall(&line, 0);
        rise(&line, 100);
        line.set_held_threshold_ms(500);
        fall(&line, 200);
        rise(&line, 800);

        assert_eq!(line.flags(), EventFlags::HELD_FOR_EXPIRED);
    }

    #[test]
    fn test_release_at_threshold_is_plain() {
        let line = line(20);
        line.set_held_threshold_ms(500);
        fall(&line, 0);
        assert_eq!(rise(&line, 500), Some(ButtonEvent::Released));
    }

    #[test]
    fn test_held_threshold_across_clock_wrap() {
        let line = line(20);
        line.set_held_threshold_ms(500);
        let start = u32::MAX - 99;
        fall(&line, start);
        // 600ms later, past the wrap
        assert_eq!(rise(&line, start.wrapping_add(600)), Some(ButtonEvent::HeldFor));
    }

    #[test]
    fn test_debounce_across_clock_wrap() {
        let line = line(20);
        fall(&line, u32::MAX - 50);
        rise(&line, u32::MAX - 5);
        // 10ms after the last edge, across the wrap
        assert_eq!(fall(&line, 4), None);
        assert_eq!(fall(&line, 40), Some(ButtonEvent::Pressed));
    }

    #[test]
    fn test_pressed_for() {
        let line = line(20);
        fall(&line, 1000);

        assert!(!line.pressed_for(1.0, 1500));
        assert!(!line.pressed_for(1.0, 2000));
        assert!(line.pressed_for(1.0, 2001));
        // Query does not latch anything new
        assert_eq!(line.flags(), EventFlags::WAS_PRESSED);

        rise(&line, 2500);
        assert!(!line.pressed_for(1.0, 5000));
    }

    #[test]
    fn test_released_for_configures_threshold() {
        let line = line(20);
        assert!(!line.released_for(2.0));
        assert_eq!(line.held_threshold_ms(), 2000);

        line.on_released_for(0.25, || {});
        assert_eq!(line.held_threshold_ms(), 250);
    }

    #[test]
    fn test_callbacks_fire() {
        static PRESSES: AtomicU32 = AtomicU32::new(0);
        static RELEASES: AtomicU32 = AtomicU32::new(0);
        static HELDS: AtomicU32 = AtomicU32::new(0);
        fn on_press() {
            PRESSES.fetch_add(1, Ordering::Relaxed);
        }
        fn on_release() {
            RELEASES.fetch_add(1, Ordering::Relaxed);
        }
        fn on_held() {
            HELDS.fetch_add(1, Ordering::Relaxed);
        }

        let line = line(20);
        line.on_pressed(on_press);
        line.on_released(on_release);
        line.on_released_for(1.0, on_held);

        fall(&line, 0);
        rise(&line, 100);
        fall(&line, 200);
        rise(&line, 1500);

        assert_eq!(PRESSES.load(Ordering::Relaxed), 2);
        assert_eq!(RELEASES.load(Ordering::Relaxed), 1);
        assert_eq!(HELDS.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_last_registration_wins() {
        static FIRST: AtomicU32 = AtomicU32::new(0);
        static SECOND: AtomicU32 = AtomicU32::new(0);
        fn first() {
            FIRST.fetch_add(1, Ordering::Relaxed);
        }
        fn second() {
            SECOND.fetch_add(1, Ordering::Relaxed);
        }

        let line = line(20);
        line.on_pressed(first);
        line.on_pressed(second);
        fall(&line, 0);

        assert_eq!(FIRST.load(Ordering::Relaxed), 0);
        assert_eq!(SECOND.load(Ordering::Relaxed), 1);
        // Bits still latch alongside callbacks
        assert!(line.was_pressed());
    }

    #[test]
    fn test_reset_events_keeps_configuration() {
        static PRESSES: AtomicU32 = AtomicU32::new(0);
        fn on_press() {
            PRESSES.fetch_add(1, Ordering::Relaxed);
        }

        let line = line(30);
        line.set_held_threshold_ms(700);
        line.on_pressed(on_press);
        fall(&line, 0);

        line.reset_events();
        assert!(line.flags().is_empty());
        assert!(line.is_held());
        assert_eq!(line.press_started_ms(), Some(0));
        assert_eq!(line.debounce_ms(), 30);
        assert_eq!(line.held_threshold_ms(), 700);

        rise(&line, 100);
        fall(&line, 200);
        assert_eq!(PRESSES.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_clear_flags_keeps_callbacks() {
        static RELEASES: AtomicU32 = AtomicU32::new(0);
        fn on_release() {
            RELEASES.fetch_add(1, Ordering::Relaxed);
        }

        let line = line(20);
        line.set_held_threshold_ms(900);
        line.on_released(on_release);
        fall(&line, 0);
        rise(&line, 100);
        fall(&line, 200);
        assert_eq!(
            line.flags(),
            EventFlags::WAS_PRESSED | EventFlags::WAS_RELEASED
        );
        assert_eq!(RELEASES.load(Ordering::Relaxed), 1);

        line.clear_flags();
        assert!(line.flags().is_empty());
        assert!(!line.was_pressed());
        assert!(line.is_held());
        assert_eq!(line.press_started_ms(), Some(200));
        assert_eq!(line.held_threshold_ms(), 900);

        // Callback survives the clear
        assert_eq!(rise(&line, 300), Some(ButtonEvent::Released));
        assert_eq!(RELEASES.load(Ordering::Relaxed), 2);
        assert_eq!(line.flags(), EventFlags::WAS_RELEASED);
    }

    #[test]
    fn test_clear_callbacks_keeps_flags() {
        static PRESSES: AtomicU32 = AtomicU32::new(0);
        static HELDS: AtomicU32 = AtomicU32::new(0);
        fn on_press() {
            PRESSES.fetch_add(1, Ordering::Relaxed);
        }
        fn on_held() {
            HELDS.fetch_add(1, Ordering::Relaxed);
        }

        let line = line(20);
        line.on_pressed(on_press);
        line.on_released_for_ms(500, on_held);
        fall(&line, 0);
        assert_eq!(PRESSES.load(Ordering::Relaxed), 1);

        line.clear_callbacks();
        assert!(line.was_pressed());
        assert_eq!(line.held_threshold_ms(), 500);

        assert_eq!(rise(&line, 800), Some(ButtonEvent::HeldFor));
        fall(&line, 900);
        assert_eq!(PRESSES.load(Ordering::Relaxed), 1);
        assert_eq!(HELDS.load(Ordering::Relaxed), 0);
        assert!(line.released_for_ms(500));
        assert!(line.was_pressed());
    }

    #[test]
    fn test_read_is_live() {
        let line = line(20);
        assert!(!line.read());
        assert!(line.is_released());

        // Level changes without an edge being delivered
        line.pin().press();
        assert!(line.read());
        assert!(line.is_pressed());
        assert!(!line.is_held());
    }

    #[test]
    fn test_inverted_line() {
        let mut config = LineConfig::new("lid", PinConfig::new(12));
        config.pin.inverted = true;
        let line = InputLine::with_config(MockPin::new(12), &config).unwrap();

        // Idle mock level is high, which is "pressed" when inverted
        assert!(line.read());
        assert_eq!(line.on_edge(0), Some(ButtonEvent::Pressed));
        line.pin().press();
        assert_eq!(line.on_edge(50), Some(ButtonEvent::Released));
    }

    #[test]
    fn test_with_config() {
        let mut config = LineConfig::new("a", PinConfig::with_pullup(39));
        config.debounce_ms = 50;
        config.held_threshold_ms = 1000;
        let line = InputLine::with_config(MockPin::new(39), &config).unwrap();

        assert_eq!(line.label(), "a");
        assert_eq!(line.debounce_ms(), 50);
        assert_eq!(line.held_threshold_ms(), 1000);
        assert_eq!(line.pin().mode(), Some(InputMode::PullUp));

        let wrong = InputLine::with_config(MockPin::new(38), &config);
        assert!(matches!(wrong, Err(PinError::InvalidPin(39))));
    }

    proptest::proptest! {
        #[test]
        fn prop_bounce_inside_window_latches_once(
            start in 0u32..1_000_000,
            gaps in proptest::collection::vec(0u32..=20, 0..32),
        ) {
            let line = line(20);
            line.pin().press();
            let mut t = start;
            let mut presses = (line.on_edge(t) == Some(ButtonEvent::Pressed)) as u32;
            for gap in gaps {
                t += gap;
                presses += (line.on_edge(t) == Some(ButtonEvent::Pressed)) as u32;
            }
            proptest::prop_assert_eq!(presses, 1);
        }

        #[test]
        fn prop_gap_past_window_latches_again(
            before in proptest::collection::vec(0u32..=20, 0..16),
            long_gap in 21u32..10_000,
            after in proptest::collection::vec(0u32..=20, 0..16),
        ) {
            let line = line(20);
            line.pin().press();
            let mut t = 0u32;
            let mut presses = (line.on_edge(t) == Some(ButtonEvent::Pressed)) as u32;
            for gap in before.into_iter().chain(Some(long_gap)).chain(after) {
                t += gap;
                presses += (line.on_edge(t) == Some(ButtonEvent::Pressed)) as u32;
            }
            proptest::prop_assert_eq!(presses, 2);
        }
    }

    #[test]
    fn test_secs_to_ms() {
        assert_eq!(secs_to_ms(1.5), 1500);
        assert_eq!(secs_to_ms(0.0), 0);
        assert_eq!(secs_to_ms(-1.0), 0);
        assert_eq!(secs_to_ms(f32::NAN), 0);
    }
}
