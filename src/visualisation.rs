// src/visualisation.rs

use crate::error::{HeatError, Result};
use crate::scalar_field::ScalarField2D;
use plotters::prelude::*;
use std::path::Path;

/// Largest edge of a rendered image, in pixels. Bigger grids are sampled.
pub const MAX_IMAGE_PX: usize = 800;

/// Map a value to a blue–white–red colour using a *local* min/max,
/// so small variations are still visible.
///
/// lo maps to blue, hi maps to red, midpoint to white.
fn value_to_color(v: f64, lo: f64, hi: f64) -> RGBColor {
    // Protect against lo ≈ hi (e.g. a uniform field)
    let (lo, hi) = if (hi - lo).abs() < 1e-300 {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    };

    let x = if v.is_finite() {
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    };

    let r = (255.0 * x) as u8;
    let b = (255.0 * (1.0 - x)) as u8;
    let g = (255.0 * (1.0 - (2.0 * (x - 0.5).abs()))).clamp(0.0, 255.0) as u8;

    RGBColor(r, g, b)
}

/// Image edge length for an n × n grid.
pub fn image_size(n: usize) -> usize {
    n.clamp(1, MAX_IMAGE_PX)
}

/// Save the field as a PNG heat map, one pixel per cell (nearest-cell
/// sampling above `MAX_IMAGE_PX`). Row j = 0 is drawn at the bottom.
pub fn save_field_png(field: &ScalarField2D, path: &Path) -> Result<()> {
    let n = field.grid.n;
    let (lo, hi) = field.finite_range().unwrap_or((-1.0, 1.0));
    let px = image_size(n);

    let root = BitMapBackend::new(path, (px as u32, px as u32)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    for py in 0..px {
        let j = (px - 1 - py) * n / px;
        for qx in 0..px {
            let i = qx * n / px;
            let color = value_to_color(field.get(i, j), lo, hi);
            root.draw_pixel((qx as i32, py as i32), &color)
                .map_err(plot_err)?;
        }
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

fn plot_err<E: std::fmt::Display>(e: E) -> HeatError {
    HeatError::Plot(e.to_string())
}
