//! Error types for the `aquarium-world` crate.
//!
//! World operations are almost all total functions over a valid state; the
//! few that validate operator-supplied geometry or schedules return
//! [`WorldError`].

/// Errors that can occur while building tank geometry or equipment.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Tank capacity must be a finite, positive number of liters.
    #[error("invalid tank capacity: {capacity} L")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: f64,
    },

    /// A daily schedule is out of range.
    #[error("invalid schedule: start hour {start_hour} (0-23), duration {duration} (0-24)")]
    InvalidSchedule {
        /// Rejected start hour.
        start_hour: u8,
        /// Rejected duration.
        duration: u8,
    },
}
