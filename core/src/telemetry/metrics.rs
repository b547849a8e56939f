use std::sync::Mutex;

/// Counts plan recomputes and rejected submissions across the session.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    recomputes: usize,
    rejected: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                recomputes: 0,
                rejected: 0,
            }),
        }
    }

    pub fn record_recompute(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.recomputes += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.recomputes, metrics.rejected)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_counts() {
        let recorder = MetricsRecorder::new();
        recorder.record_recompute();
        recorder.record_recompute();
        recorder.record_rejected();
        assert_eq!(recorder.snapshot(), (2, 1));
    }
}
