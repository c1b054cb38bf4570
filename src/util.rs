use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;

/// Tooltip date format.
pub fn format_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn format_frequency(frequency: f64) -> String {
    if frequency.fract() == 0.0 && frequency.abs() < 1e15 {
        format!("{frequency:.0}")
    } else {
        format!("{frequency:.2}")
    }
}

/// Deterministic pair in `[-1, 1]` derived from `id`.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_format_matches_tooltip() {
        let date = NaiveDate::from_ymd_opt(2014, 3, 9).expect("valid date");
        assert_eq!(format_month(date), "2014-03");
    }

    #[test]
    fn frequency_drops_trailing_zeroes_for_integers() {
        assert_eq!(format_frequency(10.0), "10");
        assert_eq!(format_frequency(4.5), "4.50");
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let first = stable_pair("engine");
        assert_eq!(first, stable_pair("engine"));
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }
}
