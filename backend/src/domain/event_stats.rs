//! Occupancy statistics for a single event.

/// Registration totals relative to an event's capacity.
///
/// `remaining_capacity` is signed: it goes negative if an event somehow holds
/// more registrations than its capacity allows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventStats {
    pub total_registrations: u32,
    pub remaining_capacity: i64,
    pub percentage_capacity_used: f64,
}

impl EventStats {
    /// Derive statistics from a capacity and a registration count.
    ///
    /// The percentage is rounded to two decimal places and is zero when the
    /// capacity is zero.
    ///
    /// # Examples
    /// ```
    /// use events_backend::domain::EventStats;
    ///
    /// let stats = EventStats::from_counts(10, 3);
    /// assert_eq!(stats.remaining_capacity, 7);
    /// assert!((stats.percentage_capacity_used - 30.0).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn from_counts(capacity: u16, total: u32) -> Self {
        let percentage = if capacity == 0 {
            0.0
        } else {
            round_to_hundredths(f64::from(total) / f64::from(capacity) * 100.0)
        };
        Self {
            total_registrations: total,
            remaining_capacity: i64::from(capacity) - i64::from(total),
            percentage_capacity_used: percentage,
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
