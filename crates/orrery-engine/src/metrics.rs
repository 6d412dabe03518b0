//! Per-pass timing metrics for the driver.

/// Timing data for the most recent complete pass over all engines.
///
/// The driving loop repopulates these fields after every pass; consumers
/// read a clone via [`Sandbox::last_metrics`](crate::Sandbox::last_metrics).
/// Durations are in microseconds.
#[derive(Clone, Debug, Default)]
pub struct PassMetrics {
    /// Number of complete passes since the driver was constructed.
    pub passes: u64,
    /// Wall-clock time of the most recent pass, in microseconds.
    pub total_us: u64,
    /// Per-engine execution times for the most recent pass:
    /// `(name, microseconds)`, in registration order.
    pub engine_us: Vec<(String, u64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = PassMetrics::default();
        assert_eq!(m.passes, 0);
        assert_eq!(m.total_us, 0);
        assert!(m.engine_us.is_empty());
    }
}
