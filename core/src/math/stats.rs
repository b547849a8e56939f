pub struct StatsHelper;

impl StatsHelper {
    /// Smallest and largest values in the series, or `None` when it is empty.
    pub fn min_max(series: &[f64]) -> Option<(f64, f64)> {
        series.iter().fold(None, |acc, &value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
    }

    /// Min-max normalisation into `[0, span]`. A flat series has no spread to
    /// stretch, so every point collapses to zero.
    pub fn scale_to_span(series: &[f64], span: f64) -> Vec<f64> {
        let (min, max) = match Self::min_max(series) {
            Some(bounds) => bounds,
            None => return Vec::new(),
        };
        let range = max - min;
        if range == 0.0 {
            return vec![0.0; series.len()];
        }
        series
            .iter()
            .map(|&value| (value - min) / range * span)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_empty_series_yields_none() {
        assert!(StatsHelper::min_max(&[]).is_none());
    }

    #[test]
    fn min_max_tracks_bounds() {
        let (min, max) = StatsHelper::min_max(&[3.0, -1.0, 7.0, 2.0]).unwrap();
        assert_eq!(min, -1.0);
        assert_eq!(max, 7.0);
    }

    #[test]
    fn flat_series_scales_to_zeros() {
        let scaled = StatsHelper::scale_to_span(&[5.0, 5.0, 5.0], 0.05);
        assert_eq!(scaled, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn scaled_series_stays_within_span() {
        let scaled = StatsHelper::scale_to_span(&[1.0, 4.0, 2.0, 9.0], 0.05);
        assert!(scaled.iter().all(|&v| (0.0..=0.05).contains(&v)));
        assert_eq!(scaled[3], 0.05);
        assert_eq!(scaled[0], 0.0);
    }
}
