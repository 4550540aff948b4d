//! Piecewise-linear lookup in an ascending table.
//!
//! `xs` must be sorted ascending (duplicates allowed). The bracketing node is
//! found by binary search, so each lookup is `O(log n)`.

/// Linearly interpolate `x` against `(xs, ys)`.
///
/// Returns NaN outside `[xs[0], xs[n-1]]` (no extrapolation). An exact node
/// hit returns that node's `y`; with duplicate `x` nodes the first one wins.
pub fn interpolate_linear(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 || !(x >= xs[0] && x <= xs[n - 1]) {
        return f64::NAN;
    }

    let hi = xs[..n].partition_point(|&xi| xi < x);
    if xs[hi] == x {
        return ys[hi];
    }

    // xs[hi - 1] < x < xs[hi]; hi >= 1 because x > xs[0] here.
    let lo = hi - 1;
    let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + t * (ys[hi] - ys[lo])
}
