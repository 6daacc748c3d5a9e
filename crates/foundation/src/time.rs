use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock instant in milliseconds since the UNIX epoch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Timestamp(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }
}

/// Clock that never goes backwards.
///
/// System time can step back (NTP adjustments); readings are floored at the
/// last value handed out so ordering by timestamp matches call order.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Timestamp,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&mut self) -> Timestamp {
        self.observe(Timestamp::now())
    }

    /// Feed an external reading through the clock.
    pub fn observe(&mut self, reading: Timestamp) -> Timestamp {
        self.last = self.last.max(reading);
        self.last
    }

    pub fn last(&self) -> Timestamp {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::{MonotonicClock, Timestamp};

    #[test]
    fn clock_never_goes_backwards() {
        let mut c = MonotonicClock::new();
        assert_eq!(c.observe(Timestamp(100)), Timestamp(100));
        assert_eq!(c.observe(Timestamp(50)), Timestamp(100));
        assert_eq!(c.observe(Timestamp(101)), Timestamp(101));
        assert_eq!(c.last(), Timestamp(101));
    }

    #[test]
    fn now_is_after_epoch() {
        let mut c = MonotonicClock::new();
        assert!(c.now().as_millis() > 0);
    }
}
