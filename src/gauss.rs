//! The SPC700's characteristic output low-pass, emulated as a 3-tap FIR.
//!
//! Applied only as an optional decode-side post-filter ([`PipelineConfig::gauss_on_decode`](crate::pipeline::PipelineConfig)).

const C0: f32 = 372.0 / 2048.0;
const C1: f32 = 1304.0 / 2048.0;

/// Apply the Gauss filter: `y[i] = c0*x[i-1] + c1*x[i] + c0*x[i+1]`, with
/// edge samples reflecting the missing neighbor into the opposite side.
/// Output length always equals input length; `N < 2` returns an unchanged
/// copy.
pub fn apply(x: &[f32]) -> Vec<f32> {
    let n = x.len();
    if n < 2 {
        return x.to_vec();
    }

    let mut y = Vec::with_capacity(n);
    y.push((C1 + C0) * x[0] + C0 * x[1]);
    for i in 1..n - 1 {
        y.push(C0 * x[i - 1] + C1 * x[i] + C0 * x[i + 1]);
    }
    y.push(C0 * x[n - 2] + (C1 + C0) * x[n - 1]);
    y
}
