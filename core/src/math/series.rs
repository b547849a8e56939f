pub struct SeriesHelper;

impl SeriesHelper {
    /// Shifts a series `lag` positions to the right, zero-filling the weeks
    /// that precede the first observed value. The tail falls off the horizon.
    pub fn shift_right(series: &[f64], lag: usize) -> Vec<f64> {
        if lag >= series.len() {
            return vec![0.0; series.len()];
        }
        let mut shifted = vec![0.0; lag];
        shifted.extend_from_slice(&series[..series.len() - lag]);
        shifted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_pads_with_zeros() {
        assert_eq!(SeriesHelper::shift_right(&[1.0, 2.0, 3.0], 2), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn zero_lag_is_identity() {
        assert_eq!(SeriesHelper::shift_right(&[1.0, 2.0], 0), vec![1.0, 2.0]);
    }

    #[test]
    fn lag_beyond_length_blanks_series() {
        assert_eq!(SeriesHelper::shift_right(&[1.0, 2.0], 5), vec![0.0, 0.0]);
    }

    #[test]
    fn empty_series_stays_empty() {
        assert!(SeriesHelper::shift_right(&[], 3).is_empty());
    }
}
