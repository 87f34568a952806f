use serde::{Deserialize, Serialize};

/// Bin count used for chart-ready distributions.
pub const DEFAULT_HISTOGRAM_BINS: usize = 40;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub bins: Vec<HistogramBin>,
}

/// Buckets samples into `bins` equal-width bins spanning `[min, max]`.
///
/// The maximum lands in the last bin. When every sample is equal the width is 1.
pub fn histogram(samples: &[f64], bins: usize) -> Histogram {
    if samples.is_empty() || bins == 0 {
        return Histogram {
            min: 0.0,
            max: 0.0,
            bin_width: 0.0,
            bins: Vec::new(),
        };
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min {
        (max - min) / bins as f64
    } else {
        1.0
    };

    let mut counts = vec![0usize; bins];
    for value in samples {
        let idx = ((value - min) / width).floor();
        let idx = if idx.is_finite() && idx > 0.0 {
            (idx as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }

    Histogram {
        min,
        max,
        bin_width: width,
        bins: counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + width * i as f64,
                end: min + width * (i + 1) as f64,
                count,
            })
            .collect(),
    }
}
