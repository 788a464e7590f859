// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
The four 1-D operator kernels: `apply` (forward causal convolution),
`apply_transpose` (adjoint, anti-causal convolution), `apply_inverse`
(causal recursion) and `apply_inverse_transpose` (adjoint recursion).

Every kernel is built on top of an `_in_place` primitive that works on a
single buffer; the two-buffer `apply`/`apply_transpose`/... entry points
just copy the source into the destination and run the in-place primitive,
which both implements the in-place-aliasing contract directly (no extra
code path to keep consistent) and gives the in-place/copy-then-apply
bit-exact equivalence spec.md 8 requires for free.
*/

use crate::error::FilterError;
use crate::lag_table::LagTable1;
use crate::zones::forward_interior;

fn check_shapes(x_len: usize, y_len: usize) -> Result<(), FilterError> {
	if x_len != y_len {
		return Err(FilterError::ShapeMismatch {
			expected: vec![x_len],
			actual: vec![y_len],
		});
	}
	Ok(())
}

/// Forward causal convolution, in place: `buf[i] = sum_j a_j * buf_old[i - lag_j]`.
pub fn apply_in_place(table: &LagTable1, buf: &mut [f64]) {
	let n = buf.len();
	let (lo, hi) = forward_interior(n, table.min(), table.max());
	for i in (0..n).rev() {
		let mut sum = table.coeff(0) * buf[i];
		if i >= lo && i < hi {
			for j in 1..table.len() {
				sum += table.coeff(j) * buf[i - table.lag(j) as usize];
			}
		} else {
			for j in 1..table.len() {
				let idx = i as i64 - table.lag(j) as i64;
				sum += table.coeff(j) * read_zero_ext(buf, idx);
			}
		}
		buf[i] = sum;
	}
}

/// Adjoint (anti-causal) convolution, in place: `buf[i] = sum_j a_j * buf_old[i + lag_j]`.
pub fn apply_transpose_in_place(table: &LagTable1, buf: &mut [f64]) {
	let n = buf.len();
	let (lo, hi) = crate::zones::adjoint_interior(n, table.min(), table.max());
	for i in 0..n {
		let mut sum = table.coeff(0) * buf[i];
		if i >= lo && i < hi {
			for j in 1..table.len() {
				sum += table.coeff(j) * buf[i + table.lag(j) as usize];
			}
		} else {
			for j in 1..table.len() {
				let idx = i as i64 + table.lag(j) as i64;
				sum += table.coeff(j) * read_zero_ext(buf, idx);
			}
		}
		buf[i] = sum;
	}
}

/// Causal recursion, in place: solves `A x = y` for `x`, visiting cells
/// in increasing order so every `x[i - lag_j]` (`j >= 1`) is already
/// solved by the time cell `i` is updated.
pub fn apply_inverse_in_place(table: &LagTable1, buf: &mut [f64]) -> Result<(), FilterError> {
	let a0 = table.a0();
	if a0 == 0.0 {
		return Err(FilterError::DegenerateCoefficient);
	}
	let n = buf.len();
	let (lo, hi) = forward_interior(n, table.min(), table.max());
	for i in 0..n {
		let mut acc = buf[i];
		if i >= lo && i < hi {
			for j in 1..table.len() {
				acc -= table.coeff(j) * buf[i - table.lag(j) as usize];
			}
		} else {
			for j in 1..table.len() {
				let idx = i as i64 - table.lag(j) as i64;
				acc -= table.coeff(j) * read_zero_ext(buf, idx);
			}
		}
		buf[i] = acc / a0;
	}
	Ok(())
}

/// Adjoint recursion, in place: visited in reverse order so every
/// `x[i + lag_j]` is already solved by the time cell `i` is updated.
pub fn apply_inverse_transpose_in_place(table: &LagTable1, buf: &mut [f64]) -> Result<(), FilterError> {
	let a0 = table.a0();
	if a0 == 0.0 {
		return Err(FilterError::DegenerateCoefficient);
	}
	let n = buf.len();
	let (lo, hi) = crate::zones::adjoint_interior(n, table.min(), table.max());
	for i in (0..n).rev() {
		let mut acc = buf[i];
		if i >= lo && i < hi {
			for j in 1..table.len() {
				acc -= table.coeff(j) * buf[i + table.lag(j) as usize];
			}
		} else {
			for j in 1..table.len() {
				let idx = i as i64 + table.lag(j) as i64;
				acc -= table.coeff(j) * read_zero_ext(buf, idx);
			}
		}
		buf[i] = acc / a0;
	}
	Ok(())
}

fn read_zero_ext(buf: &[f64], idx: i64) -> f64 {
	if idx < 0 || idx as usize >= buf.len() { 0.0 } else { buf[idx as usize] }
}

/// `y[i] = sum_j a_j * x[i - lag_j]`, zero-extended. `x` and `y` may be
/// distinct buffers of equal length; for literal aliasing use
/// [`apply_in_place`].
pub fn apply(table: &LagTable1, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
	check_shapes(x.len(), y.len())?;
	y.copy_from_slice(x);
	apply_in_place(table, y);
	Ok(())
}

pub fn apply_transpose(table: &LagTable1, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
	check_shapes(x.len(), y.len())?;
	y.copy_from_slice(x);
	apply_transpose_in_place(table, y);
	Ok(())
}

pub fn apply_inverse(table: &LagTable1, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
	check_shapes(x.len(), y.len())?;
	y.copy_from_slice(x);
	apply_inverse_in_place(table, y)
}

pub fn apply_inverse_transpose(table: &LagTable1, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
	check_shapes(x.len(), y.len())?;
	y.copy_from_slice(x);
	apply_inverse_transpose_in_place(table, y)
}
