//! Rating aggregation.

/// Arithmetic mean of the scores rounded to one decimal place, `0.0` when
/// there are none.
#[must_use]
pub fn average_rating(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    let sum: u64 = scores.iter().map(|score| u64::from(*score)).sum();

    #[expect(clippy::cast_precision_loss, reason = "rating counts stay far below 2^52")]
    let mean = sum as f64 / scores.len() as f64;

    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn no_scores_average_to_zero() {
        assert_close(average_rating(&[]), 0.0);
    }

    #[test]
    fn single_score_is_its_own_average() {
        assert_close(average_rating(&[4]), 4.0);
    }

    #[test]
    fn mean_is_rounded_to_one_decimal() {
        assert_close(average_rating(&[5, 4, 4]), 4.3);
        assert_close(average_rating(&[5, 4]), 4.5);
        assert_close(average_rating(&[1, 2, 2]), 1.7);
    }
}
