//! Decay-weighted line integration along the rows of the rotated buffer.
//!
//! For a row with valid columns `[first, last]` and centered values
//! `v[u] = p[u] - SHIFT - mean`, every column `c` receives
//!
//! ```text
//! up(c)   = Σ_{u=first}^{c} v[u] · exp(-d·(c - u))
//! down(c) = Σ_{u=c}^{last}  v[u] · exp(-d·(u - c))
//! out(c)  = up(c) - down(c)
//! ```
//!
//! Columns outside the range, and rows without foreground, stay 0.

use crate::config::{IntegrationMode, SHIFT};
use crate::decay::DecayTable;
use crate::raster::Raster;

use super::prepare::PreparedState;

/// Integrate every row of the prepared buffer into a fresh float raster of
/// the same size.
pub fn integrate(state: &PreparedState) -> Raster<f32> {
    let buffer = state.buffer();
    let mode = state.params().integration;
    let mut output = Raster::filled(buffer.width, buffer.height, 0.0f32);

    for (y, range) in state.ranges().iter().enumerate() {
        let Some(columns) = range.columns() else {
            continue;
        };
        let y = y as u32;
        let pixels = &buffer.row(y)[columns.clone()];
        let out = &mut output.row_mut(y)[columns];
        integrate_row(pixels, state.mean(), state.decay(), mode, out);
    }

    output
}

/// Integrate one valid row span. `pixels` and `out` cover exactly the range
/// `[first, last]`.
pub(crate) fn integrate_row(
    pixels: &[u16],
    mean: f64,
    decay: &DecayTable,
    mode: IntegrationMode,
    out: &mut [f32],
) {
    debug_assert_eq!(pixels.len(), out.len());
    let offset = f64::from(SHIFT) + mean;
    let centered: Vec<f64> = pixels.iter().map(|&p| f64::from(p) - offset).collect();

    match mode {
        IntegrationMode::Direct => integrate_direct(&centered, decay, out),
        IntegrationMode::Recursive => integrate_recursive(&centered, decay.ratio(), out),
    }
}

fn integrate_direct(centered: &[f64], decay: &DecayTable, out: &mut [f32]) {
    for (c, slot) in out.iter_mut().enumerate() {
        let up: f64 = centered[..=c]
            .iter()
            .enumerate()
            .map(|(u, v)| v * decay.get(c - u))
            .sum();
        let down: f64 = centered[c..]
            .iter()
            .enumerate()
            .map(|(k, v)| v * decay.get(k))
            .sum();
        *slot = (up - down) as f32;
    }
}

fn integrate_recursive(centered: &[f64], ratio: f64, out: &mut [f32]) {
    let n = centered.len();

    let mut down = vec![0.0f64; n];
    let mut acc = 0.0;
    for c in (0..n).rev() {
        acc = centered[c] + ratio * acc;
        down[c] = acc;
    }

    let mut up = 0.0;
    for c in 0..n {
        up = centered[c] + ratio * up;
        out[c] = (up - down[c]) as f32;
    }
}
