//! Per-page line gap statistics.

/// Observed vertical gaps between consecutive lines of the same block.
///
/// One accumulator lives per page and is passed by reference to whatever
/// needs it, so pages never share state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutStatistics {
    min_line_gap: Option<f32>,
    max_line_gap: Option<f32>,
    samples: usize,
}

impl LayoutStatistics {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gap observation.
    pub fn record_line_gap(&mut self, gap: f32) {
        if !gap.is_finite() {
            return;
        }
        self.min_line_gap = Some(self.min_line_gap.map_or(gap, |m| m.min(gap)));
        self.max_line_gap = Some(self.max_line_gap.map_or(gap, |m| m.max(gap)));
        self.samples += 1;
    }

    /// Smallest gap seen, if any.
    pub fn min_line_gap(&self) -> Option<f32> {
        self.min_line_gap
    }

    /// Largest gap seen, if any.
    pub fn max_line_gap(&self) -> Option<f32> {
        self.max_line_gap
    }

    /// Number of recorded gaps.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &LayoutStatistics) {
        if let Some(min) = other.min_line_gap {
            self.record_line_gap(min);
            self.samples -= 1;
        }
        if let Some(max) = other.max_line_gap {
            self.record_line_gap(max);
            self.samples -= 1;
        }
        self.samples += other.samples;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_statistics() {
        let stats = LayoutStatistics::new();
        assert_eq!(stats.min_line_gap(), None);
        assert_eq!(stats.max_line_gap(), None);
    }

    #[test]
    fn test_record_line_gap() {
        let mut stats = LayoutStatistics::new();
        stats.record_line_gap(4.0);
        stats.record_line_gap(12.0);
        stats.record_line_gap(2.0);
        stats.record_line_gap(f32::NAN);

        assert_eq!(stats.min_line_gap(), Some(2.0));
        assert_eq!(stats.max_line_gap(), Some(12.0));
        assert_eq!(stats.samples(), 3);
    }

    #[test]
    fn test_merge() {
        let mut a = LayoutStatistics::new();
        a.record_line_gap(3.0);
        let mut b = LayoutStatistics::new();
        b.record_line_gap(1.0);
        b.record_line_gap(9.0);

        a.merge(&b);
        assert_eq!(a.min_line_gap(), Some(1.0));
        assert_eq!(a.max_line_gap(), Some(9.0));
        assert_eq!(a.samples(), 3);
    }
}
