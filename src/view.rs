use crate::config::{
	FINE_ZOOM_FACTOR, FINE_ZOOM_THRESHOLD, INITIAL_CENTER, INITIAL_SCALE, MAX_SCALE, MIN_SCALE,
	PAN_STEP, ZOOM_FACTOR,
};
use crate::iterations::compute_iterations;
use crate::precision::SplitCoordinate;

/// Parameters uploaded to the fragment shader once per frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniform {
	pub center_high: [f32; 2],
	pub center_low: [f32; 2],
	pub scale: f32,
	pub max_iterations: u32,
	padding: [u32; 2], // padding to make the struct a multiple of 16 bytes
}

/// Input actions that change the view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
	ZoomIn,
	ZoomOut,
	PanUp,
	PanDown,
	PanLeft,
	PanRight,
}

impl ViewAction {
	/// Maps a typed character to its action; anything unbound is `None`.
	pub fn from_key(key: &str) -> Option<Self> {
		match key.to_ascii_lowercase().as_str() {
			"e" => Some(Self::ZoomIn),
			"q" => Some(Self::ZoomOut),
			"w" => Some(Self::PanUp),
			"s" => Some(Self::PanDown),
			"a" => Some(Self::PanLeft),
			"d" => Some(Self::PanRight),
			_ => None,
		}
	}
}

/// The visible window of the complex plane and its iteration budget.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewState {
	center: [f64; 2],
	scale: f64,
	max_iterations: u32,
}

impl Default for ViewState {
	fn default() -> Self {
		Self::new(INITIAL_CENTER, INITIAL_SCALE)
	}
}

impl ViewState {
	pub fn new(center: [f64; 2], scale: f64) -> Self {
		let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
		Self {
			center,
			scale,
			max_iterations: compute_iterations(scale),
		}
	}

	pub fn center(&self) -> [f64; 2] {
		self.center
	}

	pub fn scale(&self) -> f64 {
		self.scale
	}

	pub fn max_iterations(&self) -> u32 {
		self.max_iterations
	}

	fn zoom_factor(&self) -> f64 {
		if self.scale > FINE_ZOOM_THRESHOLD {
			ZOOM_FACTOR
		} else {
			FINE_ZOOM_FACTOR
		}
	}

	pub fn apply(&mut self, action: ViewAction) {
		let zoom = self.zoom_factor();
		let step = PAN_STEP * self.scale;
		match action {
			ViewAction::ZoomIn => self.scale = (self.scale * zoom).max(MIN_SCALE),
			ViewAction::ZoomOut => self.scale = (self.scale / zoom).min(MAX_SCALE),
			ViewAction::PanUp => self.center[1] += step,
			ViewAction::PanDown => self.center[1] -= step,
			ViewAction::PanLeft => self.center[0] -= step,
			ViewAction::PanRight => self.center[0] += step,
		}
		self.max_iterations = compute_iterations(self.scale);
	}

	/// Applies the action bound to `key`. Returns whether a binding existed.
	pub fn handle_key(&mut self, key: &str) -> bool {
		match ViewAction::from_key(key) {
			Some(action) => {
				self.apply(action);
				true
			}
			None => false,
		}
	}

	/// Snapshot for the shader, centre split into high and low limbs.
	pub fn uniform(&self) -> ViewUniform {
		let split = SplitCoordinate::new(self.center);
		ViewUniform {
			center_high: split.high_f32(),
			center_low: split.low_f32(),
			scale: self.scale as f32,
			max_iterations: self.max_iterations,
			padding: [0; 2],
		}
	}
}
