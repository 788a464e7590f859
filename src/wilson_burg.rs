// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
The Wilson-Burg spectral-factorization driver: given a symmetric
autocorrelation sampled on an odd-extent grid, iteratively updates a lag
table's coefficients so that the cascade of the resulting causal filter
with its adjoint reproduces the autocorrelation on the chosen lag set.

Each dimensionality gets its own entry point (`factorize_1d`, `_2d`,
`_3d`) since the padding, centering, and causalization math is inherently
per-dimension, but all three share the same five-step shape: pad and
center the autocorrelation, seed `a0`, iterate inverse-transpose /
inverse / causalize / forward, and read the updated coefficients back off
the padded workspace at each lag's position relative to the center.
*/

use crate::error::FilterError;
use crate::grid::{Grid1, Grid2, Grid3};
use crate::lag_table::{LagTable1, LagTable2, LagTable3};
use crate::{ops1, ops2, ops3};

/// Zero every sample strictly earlier (in NSHP/row-major order) than
/// `c_lin`, then halve the sample at `c_lin` itself. Valid for 1-, 2-
/// and 3-D workspaces alike because all three are flattened with the
/// highest dimension outermost, which is exactly the NSHP ordering.
fn causalize(buf: &mut [f64], c_lin: usize) {
	for v in buf.iter_mut().take(c_lin) {
		*v = 0.0;
	}
	buf[c_lin] *= 0.5;
}

fn pad_extent(r_extent: usize, min: i32, max: i32) -> (usize, usize) {
	let m = (max - min) as usize;
	let n = r_extent + 10 * m;
	let c = n - 1 - max as usize;
	(n, c)
}

/// Run Wilson-Burg factorization in 1-D. `r` must have odd extent.
pub fn factorize_1d(table: &mut LagTable1, maxiter: u32, eps: f64, r: &Grid1)
		-> Result<(), FilterError> {
	if r.n() % 2 == 0 {
		return Err(FilterError::ShapeMismatch { expected: vec![r.n() + 1], actual: vec![r.n()] });
	}
	let (n, c) = pad_extent(r.n(), table.min(), table.max());

	let mut s = Grid1::zeros(n);
	s.copy_centered(r, c);

	let r0 = s.as_slice()[c];
	let mut coeffs = vec![0.0; table.len()];
	coeffs[0] = r0.sqrt();
	table.set_coeffs(coeffs)?;
	let eps_conv = r0 * eps;

	let mut t = Grid1::zeros(n);
	let mut u = Grid1::zeros(n);

	for _ in 0..maxiter {
		t.as_mut_slice().copy_from_slice(s.as_slice());
		ops1::apply_inverse_transpose_in_place(table, t.as_mut_slice())?;

		u.as_mut_slice().copy_from_slice(t.as_slice());
		ops1::apply_inverse_in_place(table, u.as_mut_slice())?;

		u.as_mut_slice()[c] += 1.0;
		causalize(u.as_mut_slice(), c);

		t.as_mut_slice().copy_from_slice(u.as_slice());
		ops1::apply_in_place(table, t.as_mut_slice());

		if update_coeffs_1d(table, &t, c, eps_conv, n)? {
			return Ok(());
		}
	}
	Err(FilterError::NotConverged { iterations: maxiter })
}

fn update_coeffs_1d(table: &mut LagTable1, t: &Grid1, c: usize, eps_conv: f64, n: usize)
		-> Result<bool, FilterError> {
	let mut converged = true;
	let mut new_coeffs = vec![0.0; table.len()];
	for j in 0..table.len() {
		let ij = c as i64 + table.lag(j) as i64;
		if ij < 0 || ij as usize >= n {
			return Err(FilterError::LagOutsidePaddedWorkspace);
		}
		let aprime = t.as_slice()[ij as usize];
		if (table.coeff(j) - aprime).powi(2) > eps_conv {
			converged = false;
		}
		new_coeffs[j] = aprime;
	}
	table.set_coeffs(new_coeffs)?;
	if table.a0() == 0.0 {
		return Err(FilterError::DegenerateCoefficient);
	}
	Ok(converged)
}

/// Run Wilson-Burg factorization in 2-D. `r` must have odd extent in
/// both dimensions.
pub fn factorize_2d(table: &mut LagTable2, maxiter: u32, eps: f64, r: &Grid2)
		-> Result<(), FilterError> {
	if r.n1() % 2 == 0 || r.n2() % 2 == 0 {
		return Err(FilterError::ShapeMismatch {
			expected: vec![r.n1() + (1 - r.n1() % 2), r.n2() + (1 - r.n2() % 2)],
			actual: vec![r.n1(), r.n2()],
		});
	}
	let (n1, c1) = pad_extent(r.n1(), table.min1(), table.max1());
	let (n2, c2) = pad_extent(r.n2(), table.min2(), table.max2());
	let c_lin = c2 * n1 + c1;

	let mut s = Grid2::zeros(n1, n2);
	s.copy_centered(r, c1, c2);

	let r0 = s.as_slice()[c_lin];
	let mut coeffs = vec![0.0; table.len()];
	coeffs[0] = r0.sqrt();
	table.set_coeffs(coeffs)?;
	let eps_conv = r0 * eps;

	let mut t = vec![0.0; n1 * n2];
	let mut u = vec![0.0; n1 * n2];

	for _ in 0..maxiter {
		t.copy_from_slice(s.as_slice());
		ops2::apply_inverse_transpose_in_place(table, &mut t, n1, n2)?;

		u.copy_from_slice(&t);
		ops2::apply_inverse_in_place(table, &mut u, n1, n2)?;

		u[c_lin] += 1.0;
		causalize(&mut u, c_lin);

		t.copy_from_slice(&u);
		ops2::apply_in_place(table, &mut t, n1, n2);

		if update_coeffs_2d(table, &t, c1, c2, n1, n2, eps_conv)? {
			return Ok(());
		}
	}
	Err(FilterError::NotConverged { iterations: maxiter })
}

fn update_coeffs_2d(table: &mut LagTable2, t: &[f64], c1: usize, c2: usize, n1: usize, n2: usize,
		eps_conv: f64) -> Result<bool, FilterError> {
	let mut converged = true;
	let mut new_coeffs = vec![0.0; table.len()];
	for j in 0..table.len() {
		let i1 = c1 as i64 + table.lag1(j) as i64;
		let i2 = c2 as i64 + table.lag2(j) as i64;
		if i1 < 0 || i2 < 0 || i1 as usize >= n1 || i2 as usize >= n2 {
			return Err(FilterError::LagOutsidePaddedWorkspace);
		}
		let ij = i2 as usize * n1 + i1 as usize;
		let aprime = t[ij];
		if (table.coeff(j) - aprime).powi(2) > eps_conv {
			converged = false;
		}
		new_coeffs[j] = aprime;
	}
	table.set_coeffs(new_coeffs)?;
	if table.a0() == 0.0 {
		return Err(FilterError::DegenerateCoefficient);
	}
	Ok(converged)
}

/// Run Wilson-Burg factorization in 3-D. `r` must have odd extent in
/// all three dimensions.
pub fn factorize_3d(table: &mut LagTable3, maxiter: u32, eps: f64, r: &Grid3)
		-> Result<(), FilterError> {
	if r.n1() % 2 == 0 || r.n2() % 2 == 0 || r.n3() % 2 == 0 {
		return Err(FilterError::ShapeMismatch {
			expected: vec![
				r.n1() + (1 - r.n1() % 2),
				r.n2() + (1 - r.n2() % 2),
				r.n3() + (1 - r.n3() % 2),
			],
			actual: vec![r.n1(), r.n2(), r.n3()],
		});
	}
	let (n1, c1) = pad_extent(r.n1(), table.min1(), table.max1());
	let (n2, c2) = pad_extent(r.n2(), table.min2(), table.max2());
	let (n3, c3) = pad_extent(r.n3(), table.min3(), table.max3());
	let c_lin = (c3 * n2 + c2) * n1 + c1;

	let mut s = Grid3::zeros(n1, n2, n3);
	s.copy_centered(r, c1, c2, c3);

	let r0 = s.as_slice()[c_lin];
	let mut coeffs = vec![0.0; table.len()];
	coeffs[0] = r0.sqrt();
	table.set_coeffs(coeffs)?;
	let eps_conv = r0 * eps;

	let mut t = vec![0.0; n1 * n2 * n3];
	let mut u = vec![0.0; n1 * n2 * n3];

	for _ in 0..maxiter {
		t.copy_from_slice(s.as_slice());
		ops3::apply_inverse_transpose_in_place(table, &mut t, n1, n2, n3)?;

		u.copy_from_slice(&t);
		ops3::apply_inverse_in_place(table, &mut u, n1, n2, n3)?;

		u[c_lin] += 1.0;
		causalize(&mut u, c_lin);

		t.copy_from_slice(&u);
		ops3::apply_in_place(table, &mut t, n1, n2, n3);

		if update_coeffs_3d(table, &t, c1, c2, c3, n1, n2, n3, eps_conv)? {
			return Ok(());
		}
	}
	Err(FilterError::NotConverged { iterations: maxiter })
}

#[allow(clippy::too_many_arguments)]
fn update_coeffs_3d(table: &mut LagTable3, t: &[f64], c1: usize, c2: usize, c3: usize,
		n1: usize, n2: usize, n3: usize, eps_conv: f64) -> Result<bool, FilterError> {
	let mut converged = true;
	let mut new_coeffs = vec![0.0; table.len()];
	for j in 0..table.len() {
		let i1 = c1 as i64 + table.lag1(j) as i64;
		let i2 = c2 as i64 + table.lag2(j) as i64;
		let i3 = c3 as i64 + table.lag3(j) as i64;
		if i1 < 0 || i2 < 0 || i3 < 0
				|| i1 as usize >= n1 || i2 as usize >= n2 || i3 as usize >= n3 {
			return Err(FilterError::LagOutsidePaddedWorkspace);
		}
		let ij = (i3 as usize * n2 + i2 as usize) * n1 + i1 as usize;
		let aprime = t[ij];
		if (table.coeff(j) - aprime).powi(2) > eps_conv {
			converged = false;
		}
		new_coeffs[j] = aprime;
	}
	table.set_coeffs(new_coeffs)?;
	if table.a0() == 0.0 {
		return Err(FilterError::DegenerateCoefficient);
	}
	Ok(converged)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn factorize_1d_two_tap_scenario() {
		// spec scenario: R = [-0.5, 1.25, -0.5], lags [0, 1], expect
		// coefficients approximately [1.0, -0.5].
		let r = Grid1::from_vec(vec![-0.5, 1.25, -0.5]);
		let mut table = LagTable1::new(vec![0, 1], None).unwrap();
		factorize_1d(&mut table, 50, 1e-8, &r).unwrap();
		let c = table.coeffs();
		assert!((c[0] - 1.0).abs() < 1e-5, "a0 = {}", c[0]);
		assert!((c[1] - (-0.5)).abs() < 1e-5, "a1 = {}", c[1]);
	}

	#[test]
	fn factorize_1d_reproduces_autocorrelation() {
		let r = Grid1::from_vec(vec![-0.5, 1.25, -0.5]);
		let mut table = LagTable1::new(vec![0, 1], None).unwrap();
		factorize_1d(&mut table, 50, 1e-10, &r).unwrap();

		// Cascade A^T A on a centered impulse over a large-enough grid
		// should reproduce R at every stored lag.
		let n = 41;
		let center = n / 2;
		let mut impulse = vec![0.0; n];
		impulse[center] = 1.0;
		let mut after_a = vec![0.0; n];
		ops1::apply(&table, &impulse, &mut after_a).unwrap();
		let mut after_at = vec![0.0; n];
		ops1::apply_transpose(&table, &after_a, &mut after_at).unwrap();

		assert!((after_at[center] - 1.25).abs() < 1e-6);
		assert!((after_at[center - 1] - (-0.5)).abs() < 1e-6);
		assert!((after_at[center + 1] - (-0.5)).abs() < 1e-6);
	}

	#[test]
	fn factorize_1d_not_converged_with_zero_iterations() {
		let r = Grid1::from_vec(vec![-0.5, 1.25, -0.5]);
		let mut table = LagTable1::new(vec![0, 1], None).unwrap();
		let err = factorize_1d(&mut table, 0, 1e-8, &r).unwrap_err();
		assert_eq!(err, FilterError::NotConverged { iterations: 0 });
	}

	#[test]
	fn factorize_1d_rejects_even_extent() {
		let r = Grid1::from_vec(vec![-0.5, 1.25, -0.5, 0.1]);
		let mut table = LagTable1::new(vec![0, 1], None).unwrap();
		let err = factorize_1d(&mut table, 50, 1e-8, &r).unwrap_err();
		assert!(matches!(err, FilterError::ShapeMismatch { .. }));
	}

	#[test]
	fn factorize_2d_converges_on_separable_autocorrelation() {
		// A separable 2-D autocorrelation built from the same 1-D R so
		// the minimum-phase factor on the unit-square lag set is known
		// to exist and the iteration has something to converge to.
		let r1 = [-0.5_f64, 1.25, -0.5];
		let mut r = Grid2::zeros(3, 3);
		for i2 in 0..3 {
			for i1 in 0..3 {
				r.set(i1, i2, r1[i1] * r1[i2]);
			}
		}
		let mut table = LagTable2::new(vec![0, 1, 0, 1], vec![0, 0, 1, 1], None).unwrap();
		factorize_2d(&mut table, 100, 1e-8, &r).unwrap();
		assert!(table.a0() > 0.0);
	}
}
