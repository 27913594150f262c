//! Tunable constants.
//!
//! The iteration policy coefficients, zoom rates and palette curve are
//! empirical tuning values, not derived ones. Adjust them here.

pub const WINDOW_TITLE: &str = "Mandelbrot";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 800;

/// View the application starts with.
pub const INITIAL_CENTER: [f64; 2] = [0.0, 0.0];
pub const INITIAL_SCALE: f64 = 2.0;

// iteration policy: BASE + log2(REFERENCE / scale) * GROWTH_RATE
pub const BASE_ITERATIONS: f64 = 500.0;
pub const REFERENCE_SCALE: f64 = 2.0;
pub const ITERATION_GROWTH_RATE: f64 = 200.0;
/// Lower bound of the iteration budget, keeps zoomed-out renders from going blank.
pub const MIN_ITERATIONS: u32 = 50;

pub const ZOOM_FACTOR: f64 = 0.9;
/// Slower zoom once the view approaches the precision floor.
pub const FINE_ZOOM_FACTOR: f64 = 0.99;
pub const FINE_ZOOM_THRESHOLD: f64 = 1e-5;
/// Pan distance as a fraction of the current scale.
pub const PAN_STEP: f64 = 0.1;
/// Smallest scale whose `f32` upload is still a normal, non-zero float.
pub const MIN_SCALE: f64 = f32::MIN_POSITIVE as f64;
pub const MAX_SCALE: f64 = 1e6;

pub const PALETTE_SIZE: usize = 1024;
pub const ESCAPE_RADIUS_SQUARED: f32 = 4.0;
