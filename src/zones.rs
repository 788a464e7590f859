// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
Boundary-zone partitioning shared by the operator kernels (`ops1`, `ops2`,
`ops3`). For a given dimension's extent `n` and the stencil's cached
`(min, max)` lag bounds in that dimension, computes the half-open index
range `[lo, hi)` within which every stencil tap of the given operator
direction stays in range — the interior zone of spec.md 4.3. Indices
outside `[lo, hi)` are the edge zone and must use guarded, zero-extending
reads.

Forward (causal) reads are at `i - lag`; adjoint (anti-causal) reads are
at `i + lag`. `apply`/`apply_inverse` share the forward zone (both read
backwards along the stencil); `apply_transpose`/`apply_inverse_transpose`
share the adjoint zone.
*/

/// Interior range for the forward/causal direction: guarantees
/// `0 <= i - lag < n` for every cached lag in `[min, max]`.
pub fn forward_interior(n: usize, min: i32, max: i32) -> (usize, usize) {
	let lo = max.max(0) as i64;
	let hi = n as i64 + (min as i64).min(0);
	let lo = lo.clamp(0, n as i64) as usize;
	let hi = hi.clamp(0, n as i64) as usize;
	(lo, hi)
}

/// Interior range for the adjoint/anti-causal direction: guarantees
/// `0 <= i + lag < n` for every cached lag in `[min, max]`.
pub fn adjoint_interior(n: usize, min: i32, max: i32) -> (usize, usize) {
	let lo = (-min).max(0) as i64;
	let hi = n as i64 - (max as i64).max(0);
	let lo = lo.clamp(0, n as i64) as usize;
	let hi = hi.clamp(0, n as i64) as usize;
	(lo, hi)
}
