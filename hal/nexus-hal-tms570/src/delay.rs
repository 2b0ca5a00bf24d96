//! RTI-based delay for TMS570
//!
//! [`RtiClock`] implements [`DelayNs`] by polling the RTI free-running
//! counter 0. It is accurate to one counter tick and independent of the
//! CPU clock and code placement.

use nexus_hal::DelayNs;

use crate::vendor::RtiDriver;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Delay on the RTI free-running counter
pub struct RtiClock<R> {
    rti: R,
}

impl<R: RtiDriver> RtiClock<R> {
    /// Take the RTI and make sure counter block 0 is running
    pub fn new(mut rti: R) -> Self {
        rti.start_counter();
        Self { rti }
    }

    /// Current counter value
    pub fn now(&self) -> u32 {
        self.rti.counter()
    }

    /// Counter ticks elapsed since `earlier`, across one wrap-around
    pub fn ticks_since(&self, earlier: u32) -> u32 {
        self.rti.counter().wrapping_sub(earlier)
    }

    /// Number of counter ticks covering `ns`, rounded up
    pub fn ticks_for_ns(&self, ns: u32) -> u64 {
        let hz = u64::from(self.rti.counter_hz());
        (u64::from(ns) * hz).div_ceil(NANOS_PER_SEC)
    }

    pub fn release(self) -> R {
        self.rti
    }

    fn wait_ticks(&mut self, mut remaining: u64) {
        let mut last = self.rti.counter();
        while remaining > 0 {
            let now = self.rti.counter();
            remaining = remaining.saturating_sub(u64::from(now.wrapping_sub(last)));
            last = now;
        }
    }
}

impl<R: RtiDriver> DelayNs for RtiClock<R> {
    fn delay_ns(&mut self, ns: u32) {
        let ticks = self.ticks_for_ns(ns);
        self.wait_ticks(ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimRti;

    #[test]
    fn test_clock_starts_counter() {
        let clock = RtiClock::new(SimRti::new(1_000_000, 10));
        assert!(clock.release().is_started());
    }

    #[test]
    fn test_ticks_for_ns_rounds_up() {
        let clock = RtiClock::new(SimRti::new(1_000_000, 10));
        assert_eq!(clock.ticks_for_ns(1_000), 1);
        assert_eq!(clock.ticks_for_ns(1_001), 2);
        assert_eq!(clock.ticks_for_ns(0), 0);
        assert_eq!(clock.ticks_for_ns(1_000_000), 1_000);
    }

    #[test]
    fn test_delay_waits_for_enough_ticks() {
        let mut clock = RtiClock::new(SimRti::new(1_000_000, 100));

        clock.delay_ms(1);

        let rti = clock.release();
        // 1000 ticks at 100 per read
        assert!(rti.peek() >= 1_000);
        assert!(rti.reads() <= 12);
    }

    #[test]
    fn test_delay_across_wraparound() {
        let start = u32::MAX - 250;
        let mut clock = RtiClock::new(SimRti::new(1_000_000, 100).starting_at(start));

        clock.delay_us(500);

        let rti = clock.release();
        assert!(rti.peek() < start);
        assert!(rti.peek().wrapping_sub(start) >= 500);
    }

    #[test]
    fn test_ticks_since_across_wraparound() {
        let clock = RtiClock::new(SimRti::new(1_000_000, 100).starting_at(u32::MAX - 50));

        let earlier = clock.now();
        // one read later the counter has wrapped
        assert_eq!(clock.ticks_since(earlier), 100);
        assert!(clock.now() < earlier);
    }

    #[test]
    fn test_zero_delay_is_immediate() {
        let mut clock = RtiClock::new(SimRti::new(1_000_000, 100));
        clock.delay_ns(0);
        assert_eq!(clock.release().reads(), 1);
    }
}
