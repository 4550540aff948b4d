//! Range validation shared by every evaluator.
//!
//! Readings outside the inclusive calibrated range (and NaN readings) are
//! replaced with NaN. The caller gets one aggregated [`RangeNotice`] per
//! batch instead of one message per value.

/// Result of masking a batch against `[low, high]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeMask {
    /// `true` where the original reading is inside the range.
    pub keep: Vec<bool>,
    /// Readings with excluded entries replaced by NaN.
    pub values: Vec<f64>,
    pub low: f64,
    pub high: f64,
    /// Number of entries that were replaced.
    pub replaced: usize,
}

impl RangeMask {
    pub fn any_replaced(&self) -> bool {
        self.replaced > 0
    }

    /// The single notice for this batch, if anything was replaced.
    pub fn notice(&self) -> Option<RangeNotice> {
        self.any_replaced().then(|| RangeNotice {
            low: self.low,
            high: self.high,
            replaced: self.replaced,
            total: self.values.len(),
        })
    }
}

/// Aggregated out-of-range diagnostic for one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeNotice {
    pub low: f64,
    pub high: f64,
    pub replaced: usize,
    pub total: usize,
}

impl std::fmt::Display for RangeNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} values outside the calibration range [{}, {}]; replaced with NaN",
            self.replaced, self.total, self.low, self.high
        )
    }
}

/// Mask `values` against the inclusive range `[low, high]`.
pub fn mask_out_of_range(values: &[f64], low: f64, high: f64) -> RangeMask {
    let keep: Vec<bool> = values.iter().map(|&v| v >= low && v <= high).collect();
    let masked = values
        .iter()
        .zip(keep.iter())
        .map(|(&v, &k)| if k { v } else { f64::NAN })
        .collect();
    let replaced = keep.iter().filter(|k| !**k).count();

    RangeMask {
        keep,
        values: masked,
        low,
        high,
        replaced,
    }
}
