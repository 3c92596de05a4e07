/// Length of one aggregation slot in minutes.
pub const SLOT_MINUTES: u32 = 15;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Floors a minute-of-day to the start of its 15-minute slot.
pub fn floor_to_slot(minute: u32) -> u32 {
    minute - minute % SLOT_MINUTES
}

/// Formats a minute-of-day as zero-padded `HH:MM`.
pub fn format_slot(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[40.0, 60.0, 80.0]), 60.0);
    }

    #[test]
    fn test_floor_to_slot() {
        assert_eq!(floor_to_slot(9 * 60 + 7), 9 * 60);
        assert_eq!(floor_to_slot(14 * 60 + 52), 14 * 60 + 45);
        assert_eq!(floor_to_slot(14 * 60 + 45), 14 * 60 + 45);
        for minute in 0..24 * 60 {
            let slot = floor_to_slot(minute);
            assert!(slot <= minute && minute - slot < SLOT_MINUTES);
        }
    }

    #[test]
    fn test_format_slot() {
        assert_eq!(format_slot(0), "00:00");
        assert_eq!(format_slot(9 * 60), "09:00");
        assert_eq!(format_slot(14 * 60 + 45), "14:45");
        assert_eq!(format_slot(23 * 60 + 45), "23:45");
    }
}
