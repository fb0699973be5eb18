//! Daily on/off windows for lights and CO2 injection.

use aquarium_types::DailySchedule;

use crate::error::WorldError;

/// Hours in a day.
pub const HOURS_PER_DAY: u64 = 24;

/// Whether `hour` (0-23) falls inside the schedule window.
///
/// Windows may wrap past midnight: `{ start_hour: 22, duration: 8 }` covers
/// 22:00 through 05:59. A zero duration is never active and a duration of
/// 24 or more is always active.
pub fn is_schedule_active(hour: u64, schedule: &DailySchedule) -> bool {
    let duration = u64::from(schedule.duration);
    if duration == 0 {
        return false;
    }
    if duration >= HOURS_PER_DAY {
        return true;
    }
    let start = u64::from(schedule.start_hour) % HOURS_PER_DAY;
    let hour = hour % HOURS_PER_DAY;
    // Hours elapsed since the window opened, modulo one day.
    let offset = (hour + HOURS_PER_DAY - start) % HOURS_PER_DAY;
    offset < duration
}

/// Validate and build a schedule.
pub fn schedule(start_hour: u8, duration: u8) -> Result<DailySchedule, WorldError> {
    if start_hour > 23 || duration > 24 {
        return Err(WorldError::InvalidSchedule {
            start_hour,
            duration,
        });
    }
    Ok(DailySchedule {
        start_hour,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NIGHT: DailySchedule = DailySchedule {
        start_hour: 22,
        duration: 8,
    };

    #[test]
    fn wrapping_window() {
        assert!(is_schedule_active(23, &NIGHT));
        assert!(is_schedule_active(0, &NIGHT));
        assert!(is_schedule_active(5, &NIGHT));
        assert!(!is_schedule_active(6, &NIGHT));
        assert!(!is_schedule_active(10, &NIGHT));
        assert!(!is_schedule_active(21, &NIGHT));
    }

    #[test]
    fn daytime_window() {
        let day = DailySchedule {
            start_hour: 8,
            duration: 10,
        };
        assert!(!is_schedule_active(7, &day));
        assert!(is_schedule_active(8, &day));
        assert!(is_schedule_active(17, &day));
        assert!(!is_schedule_active(18, &day));
    }

    #[test]
    fn degenerate_durations() {
        let off = DailySchedule {
            start_hour: 3,
            duration: 0,
        };
        let always = DailySchedule {
            start_hour: 3,
            duration: 24,
        };
        for hour in 0..24 {
            assert!(!is_schedule_active(hour, &off));
            assert!(is_schedule_active(hour, &always));
        }
    }

    #[test]
    fn validation() {
        assert!(schedule(24, 1).is_err());
        assert!(schedule(0, 25).is_err());
        assert_eq!(schedule(22, 8).ok(), Some(NIGHT));
    }
}
