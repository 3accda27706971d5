//! Millisecond timestamps
//!
//! Timestamps are free-running `u32` millisecond counters (the tick task's
//! uptime). They wrap after ~49 days, so comparisons go through wrapping
//! subtraction.

/// Milliseconds from `since` to `now`, tolerant of counter wrap
pub const fn elapsed_ms(now_ms: u32, since_ms: u32) -> u32 {
    now_ms.wrapping_sub(since_ms)
}

/// Check whether `duration_ms` has passed since `since_ms`
pub const fn has_elapsed(now_ms: u32, since_ms: u32, duration_ms: u32) -> bool {
    elapsed_ms(now_ms, since_ms) >= duration_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_simple() {
        assert_eq!(elapsed_ms(1500, 1000), 500);
        assert!(has_elapsed(1500, 1000, 500));
        assert!(!has_elapsed(1499, 1000, 500));
    }

    #[test]
    fn test_zero_duration_elapses_immediately() {
        assert!(has_elapsed(1000, 1000, 0));
    }

    #[test]
    fn test_counter_wrap() {
        let since = u32::MAX - 99;
        let now = 100; // 200 ms later, after wrap
        assert_eq!(elapsed_ms(now, since), 200);
        assert!(has_elapsed(now, since, 200));
        assert!(!has_elapsed(now, since, 201));
    }
}
