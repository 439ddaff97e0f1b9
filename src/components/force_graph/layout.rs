//! Extra forces applied on top of the `force_graph` spring simulation.
//!
//! All functions return per-node displacements for the given positions; the caller
//! scales them by the current alpha and skips pinned nodes.

use super::types::LayoutParams;

/// Largest distance a node may move in one tick.
const MAX_STEP: f64 = 40.0;

pub fn repulsion(positions: &[(f64, f64)], strength: f64, max_distance: f64) -> Vec<(f64, f64)> {
	let mut out = vec![(0.0, 0.0); positions.len()];
	let max_sq = max_distance * max_distance;
	for i in 0..positions.len() {
		for j in (i + 1)..positions.len() {
			let (mut dx, mut dy) = (
				positions[i].0 - positions[j].0,
				positions[i].1 - positions[j].1,
			);
			let mut dist_sq = dx * dx + dy * dy;
			if dist_sq > max_sq {
				continue;
			}
			if dist_sq < 1e-6 {
				// Coincident nodes: separate them along a fixed, index-dependent direction.
				let angle = (i * 31 + j * 17) as f64;
				(dx, dy) = (angle.cos() * 0.1, angle.sin() * 0.1);
				dist_sq = 0.01;
			}
			let dist = dist_sq.sqrt();
			let push = strength / dist_sq.max(1.0);
			let (px, py) = (dx / dist * push, dy / dist * push);
			out[i].0 += px;
			out[i].1 += py;
			out[j].0 -= px;
			out[j].1 -= py;
		}
	}
	out
}

/// Move the ends of each link toward the target length, half the error each.
pub fn link_relaxation(
	positions: &[(f64, f64)],
	links: &[(usize, usize)],
	distance: f64,
	strength: f64,
) -> Vec<(f64, f64)> {
	let mut out = vec![(0.0, 0.0); positions.len()];
	for &(a, b) in links {
		let (dx, dy) = (
			positions[b].0 - positions[a].0,
			positions[b].1 - positions[a].1,
		);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 1e-6 {
			continue;
		}
		let shift = (dist - distance) / dist * strength * 0.5;
		out[a].0 += dx * shift;
		out[a].1 += dy * shift;
		out[b].0 -= dx * shift;
		out[b].1 -= dy * shift;
	}
	out
}

/// Pull the centroid toward the origin.
pub fn centering(positions: &[(f64, f64)], strength: f64) -> Vec<(f64, f64)> {
	if positions.is_empty() {
		return Vec::new();
	}
	let n = positions.len() as f64;
	let (sx, sy) = positions
		.iter()
		.fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
	let shift = (-sx / n * strength, -sy / n * strength);
	vec![shift; positions.len()]
}

/// One combined layout step, scaled by `alpha` and clamped to `MAX_STEP`.
pub fn step(
	positions: &[(f64, f64)],
	links: &[(usize, usize)],
	params: &LayoutParams,
	alpha: f64,
) -> Vec<(f64, f64)> {
	let repel = repulsion(positions, params.charge_strength, params.charge_max_distance);
	let pull = link_relaxation(positions, links, params.link_distance, 0.5);
	let center = centering(positions, params.center_strength);

	(0..positions.len())
		.map(|i| {
			let dx = (repel[i].0 + pull[i].0) * alpha + center[i].0;
			let dy = (repel[i].1 + pull[i].1) * alpha + center[i].1;
			let len = (dx * dx + dy * dy).sqrt();
			if len > MAX_STEP {
				(dx / len * MAX_STEP, dy / len * MAX_STEP)
			} else {
				(dx, dy)
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distant_pairs_do_not_repel() {
		let out = repulsion(&[(0.0, 0.0), (500.0, 0.0)], 900.0, 300.0);
		assert_eq!(out, vec![(0.0, 0.0), (0.0, 0.0)]);
	}

	#[test]
	fn close_pairs_push_apart() {
		let out = repulsion(&[(0.0, 0.0), (10.0, 0.0)], 900.0, 300.0);
		assert!(out[0].0 < 0.0);
		assert!(out[1].0 > 0.0);
		assert_eq!(out[0].0, -out[1].0);
	}

	#[test]
	fn coincident_nodes_separate() {
		let out = repulsion(&[(5.0, 5.0), (5.0, 5.0)], 900.0, 300.0);
		assert!(out[0] != (0.0, 0.0));
		assert!(out[0].0.is_finite() && out[0].1.is_finite());
	}

	#[test]
	fn links_move_toward_target_length() {
		let stretched = link_relaxation(&[(0.0, 0.0), (200.0, 0.0)], &[(0, 1)], 80.0, 1.0);
		assert!(stretched[0].0 > 0.0 && stretched[1].0 < 0.0);

		let squeezed = link_relaxation(&[(0.0, 0.0), (20.0, 0.0)], &[(0, 1)], 80.0, 1.0);
		assert!(squeezed[0].0 < 0.0 && squeezed[1].0 > 0.0);

		let exact = link_relaxation(&[(0.0, 0.0), (80.0, 0.0)], &[(0, 1)], 80.0, 1.0);
		assert_eq!(exact, vec![(0.0, 0.0), (0.0, 0.0)]);
	}

	#[test]
	fn centering_is_weak_and_uniform() {
		let out = centering(&[(100.0, 0.0), (300.0, 0.0)], 0.02);
		assert_eq!(out[0], out[1]);
		assert!((out[0].0 + 4.0).abs() < 1e-9);
		assert_eq!(out[0].1, 0.0);
		assert!(centering(&[], 0.02).is_empty());
	}

	#[test]
	fn steps_are_clamped() {
		let params = LayoutParams::default();
		let out = step(&[(0.0, 0.0), (0.5, 0.0)], &[], &params, 1.0);
		for (dx, dy) in out {
			assert!((dx * dx + dy * dy).sqrt() <= MAX_STEP + 1e-9);
		}
	}
}
