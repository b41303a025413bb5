use chrono::{DateTime, Utc};

/// Estimate hours worked from one author's commit timestamps.
///
/// Commits closer together than `max_commit_diff` minutes belong to the
/// same session and contribute their actual elapsed time. A larger gap
/// starts a new session; the work leading up to its first commit is not
/// visible in history, so a flat `first_commit_add` minutes is credited
/// instead. Time before the very first commit of the entire history is
/// never credited.
///
/// Input order is not trusted; the slice is re-sorted here.
pub fn estimate_hours(
    timestamps: &[DateTime<Utc>],
    max_commit_diff: u32,
    first_commit_add: u32,
) -> u32 {
    if timestamps.len() < 2 {
        return 0;
    }

    let mut sorted = timestamps.to_vec();
    sorted.sort();

    let mut hours = 0.0_f64;
    for window in sorted.windows(2) {
        let diff_in_minutes = (window[1] - window[0]).num_seconds() as f64 / 60.0;

        if diff_in_minutes < f64::from(max_commit_diff) {
            hours += diff_in_minutes / 60.0;
        } else {
            hours += f64::from(first_commit_add) / 60.0;
        }
    }

    hours.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at_minutes(offsets: &[i64]) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        offsets.iter().map(|m| base + Duration::minutes(*m)).collect()
    }

    #[test]
    fn too_few_timestamps_estimate_zero() {
        assert_eq!(estimate_hours(&[], 120, 120), 0);
        assert_eq!(estimate_hours(&at_minutes(&[0]), 120, 120), 0);
        assert_eq!(estimate_hours(&at_minutes(&[0]), 1, 10_000), 0);
    }

    #[test]
    fn gaps_inside_one_session_sum_to_elapsed_time() {
        // 30min + 60min = 1.5h, rounds up to 2
        assert_eq!(estimate_hours(&at_minutes(&[0, 30, 90]), 120, 120), 2);
    }

    #[test]
    fn a_session_break_credits_the_flat_addition() {
        // 200min gap exceeds the 120min threshold: 120/60 = 2h exactly
        assert_eq!(estimate_hours(&at_minutes(&[0, 200]), 120, 120), 2);
    }

    #[test]
    fn threshold_is_exclusive() {
        // A gap of exactly max_commit_diff is a session break
        assert_eq!(estimate_hours(&at_minutes(&[0, 120]), 120, 60), 1);
        // Just under the threshold counts as elapsed time
        assert_eq!(estimate_hours(&at_minutes(&[0, 119]), 120, 60), 2);
    }

    #[test]
    fn estimate_is_input_order_independent() {
        let sorted = at_minutes(&[0, 15, 45, 300, 330]);
        let shuffled = at_minutes(&[300, 0, 330, 45, 15]);
        assert_eq!(
            estimate_hours(&sorted, 120, 120),
            estimate_hours(&shuffled, 120, 120)
        );
    }

    #[test]
    fn sessions_and_breaks_combine() {
        // 0..30 (0.5h) + 30..90 (1h) + break (2h) + 300..330 (0.5h) = 4h
        assert_eq!(estimate_hours(&at_minutes(&[0, 30, 90, 300, 330]), 120, 120), 4);
    }

    #[test]
    fn custom_session_parameters_are_honored() {
        // 240min threshold keeps the 200min gap inside one session
        assert_eq!(estimate_hours(&at_minutes(&[0, 200]), 240, 120), 3);
        // 300min flat addition per break
        assert_eq!(estimate_hours(&at_minutes(&[0, 200]), 120, 300), 5);
    }
}
