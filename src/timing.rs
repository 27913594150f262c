use std::time::Duration;

cfg_if::cfg_if! {
	if #[cfg(target_arch = "wasm32")] {
		use web_time::Instant;
	} else {
		use std::time::Instant;
	}
}

/// Measures the time between consecutive input events.
#[derive(Debug)]
pub struct FrameTimer {
	last: Option<Instant>,
}

impl FrameTimer {
	pub fn new() -> Self {
		Self { last: None }
	}

	/// Time since the previous call and restart. The first lap is zero.
	pub fn lap(&mut self) -> Duration {
		let now = Instant::now();
		let elapsed = self
			.last
			.map_or(Duration::ZERO, |last| now.duration_since(last));
		self.last = Some(now);
		elapsed
	}
}

impl Default for FrameTimer {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_first_lap_is_zero() {
		let mut timer = FrameTimer::new();
		std::thread::sleep(Duration::from_millis(20));
		assert_eq!(timer.lap(), Duration::ZERO);
	}

	#[test]
	fn test_lap_restarts_measurement() {
		let mut timer = FrameTimer::new();
		timer.lap();
		std::thread::sleep(Duration::from_millis(20));
		let second = timer.lap();
		let third = timer.lap();
		assert!(second >= Duration::from_millis(20));
		assert!(third < second);
	}
}
