//! Gaussian kernel density estimation.
//!
//! Bandwidth follows Scott's normal-reference rule, the same default the
//! common grammar-of-graphics toolkits use:
//!
//! ```text
//! h = 1.06 · min(σ, IQR / 1.34) · n^(-1/5)
//! ```
//!
//! When the sample has no spread the rule degenerates, so σ, then |Q1|,
//! then 1 are used in turn as the scale.

use std::f64::consts::PI;

/// Sample standard deviation (n − 1). Zero for fewer than two values.
fn deviation(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}

/// Linearly interpolated quantile of an ascending slice.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = (n - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Scott's rule bandwidth. Returns 1.0 for an empty sample.
pub fn estimate_bandwidth(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 1.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile_sorted(&sorted, 0.25);
    let q3 = quantile_sorted(&sorted, 0.75);
    let d = deviation(&sorted);
    let iqr_scale = (q3 - q1) / 1.34;

    // Spread below float resolution at this magnitude counts as none.
    let tiny = f64::EPSILON * q1.abs().max(q3.abs()).max(1.0);
    let mut scale = d.min(iqr_scale);
    if scale <= tiny {
        scale = d;
    }
    if scale <= tiny {
        scale = q1.abs();
    }
    if scale <= tiny {
        scale = 1.0;
    }
    1.06 * scale * (values.len() as f64).powf(-0.2)
}

/// Evaluate the (unnormalised-by-domain) kernel density at `x`.
fn kde_at(values: &[f64], bandwidth: f64, x: f64) -> f64 {
    let norm = 1.0 / ((2.0 * PI).sqrt() * bandwidth * values.len() as f64);
    values
        .iter()
        .map(|v| {
            let z = (x - v) / bandwidth;
            (-0.5 * z * z).exp()
        })
        .sum::<f64>()
        * norm
}

/// Trapezoidal area under a sampled curve.
pub fn trapezoid_area(points: &[[f64; 2]]) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1][0] - w[0][0]) * (w[0][1] + w[1][1]) * 0.5)
        .sum()
}

/// Domain spanning every value of every group.
///
/// A zero-width extent (all values equal, or within rounding of each other)
/// is padded by three bandwidths on each side so the curve has room to rise
/// and fall. `None` when every group is empty.
pub fn shared_domain(groups: &[&[f64]]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in groups.iter().flat_map(|g| g.iter()) {
        lo = lo.min(*v);
        hi = hi.max(*v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    if hi - lo <= f64::EPSILON * hi.abs().max(lo.abs()).max(1.0) {
        let pad = groups
            .iter()
            .filter(|g| !g.is_empty())
            .map(|g| estimate_bandwidth(g))
            .fold(0.0f64, f64::max)
            * 3.0;
        return Some((lo - pad, hi + pad));
    }
    Some((lo, hi))
}

/// Sample the density of `values` at `steps` evenly spaced points over
/// `domain`, rescaled so the trapezoidal area over the domain is exactly 1.
///
/// Returns an empty curve for an empty sample.
pub fn sample_density(values: &[f64], domain: (f64, f64), steps: usize) -> Vec<[f64; 2]> {
    if values.is_empty() || steps < 2 {
        return Vec::new();
    }
    let bandwidth = estimate_bandwidth(values);
    let (lo, hi) = domain;
    let dx = (hi - lo) / (steps - 1) as f64;

    let mut points: Vec<[f64; 2]> = (0..steps)
        .map(|i| {
            let x = if i == steps - 1 { hi } else { lo + dx * i as f64 };
            [x, kde_at(values, bandwidth, x)]
        })
        .collect();

    let area = trapezoid_area(&points);
    if area > 0.0 && area.is_finite() {
        for p in &mut points {
            p[1] /= area;
        }
    }
    points
}
