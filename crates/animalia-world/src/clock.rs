//! World clock for the Animalia simulation.
//!
//! The tick counter is the only global clock. Every time-dependent rule
//! (idle periods while roaming, state-change timestamps) reads it from
//! here, and it only ever moves forward by one.

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}

/// Monotonically increasing tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorldClock {
    /// Current tick number. 0 before the first tick has run.
    tick: u64,
}

impl WorldClock {
    /// A clock at tick 0.
    pub const fn new() -> Self {
        Self { tick: 0 }
    }

    /// A clock resumed at an explicit tick (useful for tests).
    pub const fn starting_at(tick: u64) -> Self {
        Self { tick }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Return the current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Whether the current tick is a multiple of `period`.
    ///
    /// A zero period never matches.
    pub const fn is_multiple_of(&self, period: u64) -> bool {
        match self.tick.checked_rem(period) {
            Some(rem) => rem == 0,
            None => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn advance_increments_by_one() {
        let mut clock = WorldClock::new();
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.advance().unwrap(), 1);
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.tick(), 2);
    }

    #[test]
    fn advance_overflow_is_an_error() {
        let mut clock = WorldClock::starting_at(u64::MAX);
        assert_eq!(clock.advance(), Err(ClockError::TickOverflow));
        assert_eq!(clock.tick(), u64::MAX);
    }

    #[test]
    fn period_matching() {
        assert!(WorldClock::starting_at(80).is_multiple_of(40));
        assert!(!WorldClock::starting_at(81).is_multiple_of(40));
        assert!(WorldClock::starting_at(0).is_multiple_of(40));
        assert!(!WorldClock::starting_at(40).is_multiple_of(0));
    }
}
