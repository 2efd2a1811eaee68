//! Travel time handling.
//!
//! Edge records carry travel times in whole seconds. The network works in
//! minutes (as `f64`) so that distances read naturally, and converts back to
//! a `chrono::Duration` only for display.

use chrono::Duration;
use std::fmt;

/// A normalized travel time, in minutes.
///
/// # Examples
///
/// ```
/// use metro_server::domain::TravelTime;
///
/// let t = TravelTime::from_seconds(150.0);
/// assert_eq!(t.minutes(), 2.5);
/// assert_eq!(t.to_string(), "2 min 30 sec");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct TravelTime(f64);

impl TravelTime {
    /// The zero travel time.
    pub const ZERO: TravelTime = TravelTime(0.0);

    /// Create a travel time from raw seconds.
    pub fn from_seconds(seconds: f64) -> Self {
        Self(seconds / 60.0)
    }

    /// Create a travel time from minutes.
    pub fn from_minutes(minutes: f64) -> Self {
        Self(minutes)
    }

    /// Returns the travel time in minutes.
    pub fn minutes(&self) -> f64 {
        self.0
    }

    /// Returns the travel time rounded to the nearest second.
    ///
    /// Saturates at `Duration::MAX` (or `MIN`) beyond chrono's range.
    pub fn to_duration(&self) -> Duration {
        let seconds = (self.0 * 60.0).round();
        Duration::try_seconds(seconds as i64).unwrap_or(if seconds < 0.0 {
            Duration::MIN
        } else {
            Duration::MAX
        })
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.to_duration();
        let mins = d.num_minutes();
        let secs = d.num_seconds() - mins * 60;
        write!(f, "{mins} min {secs} sec")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_are_normalized_to_minutes() {
        assert_eq!(TravelTime::from_seconds(60.0).minutes(), 1.0);
        assert_eq!(TravelTime::from_seconds(180.0).minutes(), 3.0);
        assert_eq!(TravelTime::from_seconds(0.0), TravelTime::ZERO);
    }

    #[test]
    fn display_minutes_and_seconds() {
        assert_eq!(TravelTime::from_minutes(3.0).to_string(), "3 min 0 sec");
        assert_eq!(TravelTime::from_seconds(75.0).to_string(), "1 min 15 sec");
        assert_eq!(TravelTime::ZERO.to_string(), "0 min 0 sec");
    }

    #[test]
    fn display_never_shows_sixty_seconds() {
        // 1.999 min is 119.94 s, which rounds to 2 min flat
        assert_eq!(TravelTime::from_minutes(1.999).to_string(), "2 min 0 sec");
    }

    #[test]
    fn to_duration_rounds_to_seconds() {
        assert_eq!(
            TravelTime::from_minutes(2.51).to_duration(),
            Duration::seconds(151)
        );
    }

    #[test]
    fn huge_times_saturate() {
        let huge = TravelTime::from_minutes(1.6e16);
        assert_eq!(huge.to_duration(), Duration::MAX);
        assert!(huge.to_string().starts_with(&format!(
            "{} min ",
            Duration::MAX.num_minutes()
        )));

        assert_eq!(TravelTime::from_minutes(-1e300).to_duration(), Duration::MIN);
    }
}
