//! CPU reference for the per-pixel kernel in `shader.wgsl`.
//!
//! Every step is done in `f32`, in the same order as the fragment shader, so
//! the two agree on which points escape and when.

use num_complex::Complex;

use crate::config::ESCAPE_RADIUS_SQUARED;
use crate::palette::Palette;
use crate::view::ViewUniform;

/// Maps a normalized screen sample in `[0, 1]²` to a point of the complex plane.
///
/// The two centre limbs are summed first, the scaled offset is added after.
pub fn sample_to_complex(sample: [f32; 2], view: &ViewUniform) -> Complex<f32> {
	let high = Complex::new(view.center_high[0], view.center_high[1]);
	let low = Complex::new(view.center_low[0], view.center_low[1]);
	let offset = Complex::new(sample[0] - 0.5, sample[1] - 0.5) * view.scale;
	(high + low) + offset
}

fn compute_next(z: Complex<f32>, c: Complex<f32>) -> Complex<f32> {
	z * z + c
}

/// Number of iterations of `z <- z² + c` before `|z|²` exceeds the escape
/// radius, or `max_iterations` if it never does.
pub fn escape_time(c: Complex<f32>, max_iterations: u32) -> u32 {
	let mut z = Complex::new(0.0f32, 0.0);
	let mut i = 0;
	while i < max_iterations {
		z = compute_next(z, c);
		if z.norm_sqr() > ESCAPE_RADIUS_SQUARED {
			break;
		}
		i += 1;
	}
	i
}

/// `1.0` means the point never escaped.
pub fn color_index(iterations: u32, max_iterations: u32) -> f32 {
	iterations as f32 / max_iterations as f32
}

pub fn evaluate(sample: [f32; 2], view: &ViewUniform) -> f32 {
	let c = sample_to_complex(sample, view);
	color_index(escape_time(c, view.max_iterations), view.max_iterations)
}

/// Colour of one pixel. Pure in its inputs, so pixels can be shaded in any order.
pub fn shade(sample: [f32; 2], view: &ViewUniform, palette: &Palette) -> [f32; 3] {
	palette.sample(evaluate(sample, view))
}
