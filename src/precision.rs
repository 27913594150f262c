/// A view-space point split per axis into a coarse integer limb and a fine residual.
///
/// The split is taken in double precision on the CPU. The shader adds the two
/// limbs together before adding its per-pixel offset, which keeps more of the
/// centre's precision than a single `f32` would at deep zoom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SplitCoordinate {
	pub high: [f64; 2],
	pub low: [f64; 2],
}

impl SplitCoordinate {
	pub fn new(center: [f64; 2]) -> Self {
		let high = [center[0].floor(), center[1].floor()];
		let low = [center[0] - high[0], center[1] - high[1]];
		Self { high, low }
	}

	/// `high + low` in double precision.
	pub fn recombine(&self) -> [f64; 2] {
		[self.high[0] + self.low[0], self.high[1] + self.low[1]]
	}

	pub fn high_f32(&self) -> [f32; 2] {
		[self.high[0] as f32, self.high[1] as f32]
	}

	pub fn low_f32(&self) -> [f32; 2] {
		[self.low[0] as f32, self.low[1] as f32]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, Rng, SeedableRng};

	#[test]
	fn test_split_of_scenario_center() {
		let split = SplitCoordinate::new([-0.75, 0.1]);
		assert_eq!(split.high, [-1.0, 0.0]);
		assert_eq!(split.low, [0.25, 0.1]);
	}

	#[test]
	fn test_high_is_integral_and_low_in_unit_interval() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..10_000 {
			let center = [rng.gen_range(-1e6..1e6), rng.gen_range(-1e6..1e6)];
			let split = SplitCoordinate::new(center);
			for axis in 0..2 {
				assert_eq!(split.high[axis].fract(), 0.0);
				assert!(split.low[axis] >= 0.0 && split.low[axis] < 1.0);
			}
		}
	}

	#[test]
	fn test_recombine_is_lossless_outside_negative_unit_interval() {
		let mut rng = StdRng::seed_from_u64(42);
		for _ in 0..10_000 {
			let mut x: f64 = rng.gen_range(-1e9..1e9);
			if x > -1.0 && x < 0.0 {
				x -= 1.0;
			}
			let y: f64 = rng.gen_range(0.0..1.0);
			let split = SplitCoordinate::new([x, y]);
			assert_eq!(split.recombine(), [x, y]);
		}
	}

	#[test]
	fn test_recombine_tiny_negative_within_one_ulp_of_one() {
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..10_000 {
			let x: f64 = -rng.gen_range(f64::MIN_POSITIVE..1.0);
			let split = SplitCoordinate::new([x, x]);
			let [rx, ry] = split.recombine();
			assert!((rx - x).abs() <= f64::EPSILON);
			assert!((ry - x).abs() <= f64::EPSILON);
		}
	}

	#[test]
	fn test_large_values_keep_all_bits_in_high() {
		let x = 2f64.powi(60) + 4096.0;
		let split = SplitCoordinate::new([x, -x]);
		assert_eq!(split.high, [x, -x]);
		assert_eq!(split.low, [0.0, 0.0]);
	}

	#[test]
	fn test_f32_limbs_keep_residual_precision() {
		// 3 + 1e-7 is not representable in f32, but both limbs are close
		let split = SplitCoordinate::new([3.0 + 1e-7, 0.0]);
		assert_eq!(split.high_f32(), [3.0, 0.0]);
		assert!((split.low_f32()[0] - 1e-7).abs() < 1e-12);
	}
}
