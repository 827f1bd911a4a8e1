//! Monotonic millisecond clock
//!
//! Timestamps are `u32` milliseconds and wrap after roughly 49.7 days.
//! All interval math must go through [`elapsed_ms`].

/// Wrapping millisecond time source
pub trait MonotonicClock {
    /// Current time in milliseconds
    fn now_ms(&self) -> u32;
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `since` to `now`, correct across one wrap
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
