//! Countdown clock for a debate session.
//!
//! The server owns the real clock; every response carries its
//! `time_remaining` reading. Between responses the front-end interpolates
//! with one-second ticks, so the display counts down smoothly while a
//! round trip is in flight.

/// Length of a debate session in seconds (the server's five-minute clock).
pub const SESSION_SECONDS: u32 = 300;

/// What a tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Still counting down.
    Running,
    /// This tick crossed zero. Reported exactly once per session.
    Expired,
    /// Ticking past zero while the final report is pending.
    Overtime,
}

/// Tick-driven integer countdown, re-synced from each server response.
#[derive(Debug, Clone)]
pub struct DebateClock {
    remaining: u32,
    expired_seen: bool,
    overtime: u32,
}

impl DebateClock {
    /// Create a clock with the given number of seconds on it.
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            expired_seen: false,
            overtime: 0,
        }
    }

    /// Seconds left on the countdown.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    /// Seconds elapsed since the countdown hit zero.
    pub fn overtime_secs(&self) -> u32 {
        self.overtime
    }

    /// Whether the countdown has reached zero.
    pub fn is_expired(&self) -> bool {
        self.expired_seen
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) -> ClockEvent {
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.expired_seen = true;
                return ClockEvent::Expired;
            }
            ClockEvent::Running
        } else if !self.expired_seen {
            self.expired_seen = true;
            ClockEvent::Expired
        } else {
            self.overtime += 1;
            ClockEvent::Overtime
        }
    }

    /// Adopt the server's reading.
    ///
    /// The server is authoritative while the session runs, but a clock
    /// never restarts once expiry has been observed: by then the
    /// end-of-session handshake is already under way.
    pub fn sync(&mut self, server_remaining: u32) {
        if !self.expired_seen {
            self.remaining = server_remaining;
        }
    }

    /// Format the countdown as `M:SS`.
    pub fn format(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

impl Default for DebateClock {
    fn default() -> Self {
        Self::new(SESSION_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down() {
        let mut clock = DebateClock::new(3);
        assert_eq!(clock.tick(), ClockEvent::Running);
        assert_eq!(clock.remaining_secs(), 2);
        assert_eq!(clock.tick(), ClockEvent::Running);
        assert_eq!(clock.tick(), ClockEvent::Expired);
        assert_eq!(clock.remaining_secs(), 0);
    }

    #[test]
    fn test_expiry_reported_once() {
        let mut clock = DebateClock::new(1);
        assert_eq!(clock.tick(), ClockEvent::Expired);
        assert_eq!(clock.tick(), ClockEvent::Overtime);
        assert_eq!(clock.tick(), ClockEvent::Overtime);
        assert_eq!(clock.overtime_secs(), 2);
    }

    #[test]
    fn test_zero_length_clock_expires_on_first_tick() {
        let mut clock = DebateClock::new(0);
        assert!(!clock.is_expired());
        assert_eq!(clock.tick(), ClockEvent::Expired);
        assert!(clock.is_expired());
    }

    #[test]
    fn test_sync_adopts_server_reading() {
        let mut clock = DebateClock::new(300);
        clock.tick();
        clock.tick();
        clock.sync(290);
        assert_eq!(clock.remaining_secs(), 290);
    }

    #[test]
    fn test_sync_ignored_after_expiry() {
        let mut clock = DebateClock::new(1);
        clock.tick();
        clock.sync(60);
        assert!(clock.is_expired());
        assert_eq!(clock.remaining_secs(), 0);
    }

    #[test]
    fn test_format() {
        assert_eq!(DebateClock::new(300).format(), "5:00");
        assert_eq!(DebateClock::new(61).format(), "1:01");
        assert_eq!(DebateClock::new(9).format(), "0:09");
        assert_eq!(DebateClock::new(0).format(), "0:00");
    }
}
