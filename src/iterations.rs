use crate::config::{BASE_ITERATIONS, ITERATION_GROWTH_RATE, MIN_ITERATIONS, REFERENCE_SCALE};

/// Iteration budget for a view of the given scale.
///
/// Grows logarithmically as the view zooms in and is floored at
/// [`MIN_ITERATIONS`] when zooming out. Non-decreasing as `scale` shrinks.
pub fn compute_iterations(scale: f64) -> u32 {
	let scale = scale.max(f64::MIN_POSITIVE);
	let iterations = BASE_ITERATIONS + (REFERENCE_SCALE / scale).log2() * ITERATION_GROWTH_RATE;
	// `as` truncates toward zero and saturates
	(iterations as u32).max(MIN_ITERATIONS)
}
