use crate::config::PALETTE_SIZE;

/// Gradient curve the palette is built from, `t` in `[0, 1]`.
fn gradient_curve(t: f32) -> [f32; 3] {
	[t, t * t, t.sqrt()]
}

/// Precomputed colour gradient indexed by a normalized escape value.
///
/// Built once at startup and only read afterwards.
#[derive(Clone, Debug)]
pub struct Palette {
	entries: Vec<[f32; 3]>,
}

impl Palette {
	pub fn gradient() -> Self {
		let last = (PALETTE_SIZE - 1) as f32;
		let entries = (0..PALETTE_SIZE)
			.map(|k| gradient_curve(k as f32 / last))
			.collect();
		Self { entries }
	}

	pub fn entries(&self) -> &[[f32; 3]] {
		&self.entries
	}

	/// Colour at `index`, interpolated linearly between neighbouring entries
	/// and clamped to the first and last entry outside `[0, 1]`.
	pub fn sample(&self, index: f32) -> [f32; 3] {
		let last = self.entries.len() - 1;
		let position = index.clamp(0.0, 1.0) * last as f32;
		let k = position.floor() as usize;
		if k >= last {
			return self.entries[last];
		}
		let frac = position - k as f32;
		let (a, b) = (self.entries[k], self.entries[k + 1]);
		[
			(a[0] + (b[0] - a[0]) * frac).min(b[0]),
			(a[1] + (b[1] - a[1]) * frac).min(b[1]),
			(a[2] + (b[2] - a[2]) * frac).min(b[2]),
		]
	}

	/// RGBA8 texel data for the palette lookup texture, alpha fully opaque.
	pub fn to_rgba8(&self) -> Vec<u8> {
		self.entries
			.iter()
			.flat_map(|[r, g, b]| [to_unorm8(*r), to_unorm8(*g), to_unorm8(*b), u8::MAX])
			.collect()
	}
}

fn to_unorm8(value: f32) -> u8 {
	(value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, Rng, SeedableRng};

	#[test]
	fn test_palette_has_fixed_size() {
		assert_eq!(Palette::gradient().entries().len(), PALETTE_SIZE);
	}

	#[test]
	fn test_sample_edges_hit_first_and_last_entry() {
		let palette = Palette::gradient();
		assert_eq!(palette.sample(0.0), [0.0, 0.0, 0.0]);
		assert_eq!(palette.sample(1.0), [1.0, 1.0, 1.0]);
	}

	#[test]
	fn test_sample_clamps_outside_domain() {
		let palette = Palette::gradient();
		assert_eq!(palette.sample(-3.0), palette.sample(0.0));
		assert_eq!(palette.sample(7.5), palette.sample(1.0));
	}

	#[test]
	fn test_sample_on_entry_returns_entry() {
		let palette = Palette::gradient();
		let k = 512;
		let index = k as f32 / (PALETTE_SIZE - 1) as f32;
		let entry = palette.entries()[k];
		let sampled = palette.sample(index);
		for channel in 0..3 {
			assert!((sampled[channel] - entry[channel]).abs() < 1e-6);
		}
	}

	#[test]
	fn test_sample_interpolates_between_entries() {
		let palette = Palette::gradient();
		let halfway = 0.5 / (PALETTE_SIZE - 1) as f32;
		let [r, g, b] = palette.sample(halfway);
		let next = palette.entries()[1];
		assert!((r - next[0] / 2.0).abs() < 1e-6);
		assert!((g - next[1] / 2.0).abs() < 1e-6);
		assert!((b - next[2] / 2.0).abs() < 1e-6);
	}

	#[test]
	fn test_sample_is_monotonic_per_channel() {
		let palette = Palette::gradient();
		let mut rng = StdRng::seed_from_u64(11);
		let mut indices: Vec<f32> = (0..20_000).map(|_| rng.gen_range(0.0..=1.0)).collect();
		indices.extend((0..=4096).map(|i| i as f32 / 4096.0));
		indices.sort_by(f32::total_cmp);

		let mut previous = palette.sample(indices[0]);
		for index in &indices[1..] {
			let current = palette.sample(*index);
			for channel in 0..3 {
				assert!(current[channel] >= previous[channel], "channel {channel} decreased at {index}");
			}
			previous = current;
		}
	}

	#[test]
	fn test_rgba8_payload_matches_texture_size() {
		let bytes = Palette::gradient().to_rgba8();
		assert_eq!(bytes.len(), PALETTE_SIZE * 4);
		assert_eq!(&bytes[..4], &[0, 0, 0, 255]);
		assert_eq!(&bytes[bytes.len() - 4..], &[255, 255, 255, 255]);
	}
}
