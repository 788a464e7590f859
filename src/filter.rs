// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
Public facade types: one struct per dimensionality, each wrapping a lag
table and dispatching to the operator kernels and the Wilson-Burg driver.
This is the crate's main entry point; `lag_table`, `grid`, `ops1`/`ops2`/
`ops3` and `wilson_burg` are the machinery underneath it.
*/

use crate::error::FilterError;
use crate::grid::{Grid1, Grid2, Grid3};
use crate::lag_table::{LagTable1, LagTable2, LagTable3};
use crate::{ops1, ops2, ops3, wilson_burg};

/// A causal 1-D recursive filter: a validated lag table plus the four
/// operators built on top of it.
#[derive(Debug, Clone)]
pub struct Filter1 {
	table: LagTable1,
}

impl Filter1 {
	/// Build a filter from parallel lag/coefficient arrays. `lags[0]`
	/// must be `0`; every other lag must be strictly positive.
	pub fn new(lags: Vec<i32>, coeffs: Option<Vec<f64>>) -> Result<Filter1, FilterError> {
		Ok(Filter1 { table: LagTable1::new(lags, coeffs)? })
	}

	/// The backing lag table.
	pub fn lag_table(&self) -> &LagTable1 { &self.table }

	/// `y = A x`: the forward causal convolution.
	pub fn apply(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops1::apply(&self.table, x, y)
	}

	/// `y = A^T x`: the adjoint, anti-causal convolution.
	pub fn apply_transpose(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops1::apply_transpose(&self.table, x, y)
	}

	/// `y = A^-1 x`: the causal recursion that inverts `apply`.
	pub fn apply_inverse(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops1::apply_inverse(&self.table, x, y)
	}

	/// `y = A^-T x`: the adjoint recursion that inverts `apply_transpose`.
	pub fn apply_inverse_transpose(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops1::apply_inverse_transpose(&self.table, x, y)
	}

	/// Run Wilson-Burg factorization against the autocorrelation `r`
	/// (odd extent, centered at its middle index), overwriting this
	/// filter's coefficients with the minimum-phase causal factor.
	pub fn factorize(&mut self, maxiter: u32, eps: f64, r: &Grid1) -> Result<(), FilterError> {
		wilson_burg::factorize_1d(&mut self.table, maxiter, eps, r)
	}
}

/// A causal 2-D recursive filter over an NSHP lag table.
#[derive(Debug, Clone)]
pub struct Filter2 {
	table: LagTable2,
	n1: usize,
	n2: usize,
}

impl Filter2 {
	/// Build a filter for grids of extent `n1 x n2`, from parallel lag
	/// arrays `lags1`/`lags2`.
	pub fn new(n1: usize, n2: usize, lags1: Vec<i32>, lags2: Vec<i32>, coeffs: Option<Vec<f64>>)
			-> Result<Filter2, FilterError> {
		Ok(Filter2 { table: LagTable2::new(lags1, lags2, coeffs)?, n1, n2 })
	}

	pub fn lag_table(&self) -> &LagTable2 { &self.table }
	pub fn shape(&self) -> (usize, usize) { (self.n1, self.n2) }

	pub fn apply(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops2::apply(&self.table, x, y, self.n1, self.n2)
	}

	pub fn apply_transpose(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops2::apply_transpose(&self.table, x, y, self.n1, self.n2)
	}

	pub fn apply_inverse(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops2::apply_inverse(&self.table, x, y, self.n1, self.n2)
	}

	pub fn apply_inverse_transpose(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops2::apply_inverse_transpose(&self.table, x, y, self.n1, self.n2)
	}

	/// Run Wilson-Burg factorization against the autocorrelation `r`
	/// (odd extent in both dimensions, centered at its middle indices).
	pub fn factorize(&mut self, maxiter: u32, eps: f64, r: &Grid2) -> Result<(), FilterError> {
		wilson_burg::factorize_2d(&mut self.table, maxiter, eps, r)
	}
}

/// A causal 3-D recursive filter over an NSHP lag table.
#[derive(Debug, Clone)]
pub struct Filter3 {
	table: LagTable3,
	n1: usize,
	n2: usize,
	n3: usize,
}

impl Filter3 {
	/// Build a filter for grids of extent `n1 x n2 x n3`, from parallel
	/// lag arrays `lags1`/`lags2`/`lags3`.
	pub fn new(n1: usize, n2: usize, n3: usize, lags1: Vec<i32>, lags2: Vec<i32>, lags3: Vec<i32>,
			coeffs: Option<Vec<f64>>) -> Result<Filter3, FilterError> {
		Ok(Filter3 { table: LagTable3::new(lags1, lags2, lags3, coeffs)?, n1, n2, n3 })
	}

	pub fn lag_table(&self) -> &LagTable3 { &self.table }
	pub fn shape(&self) -> (usize, usize, usize) { (self.n1, self.n2, self.n3) }

	pub fn apply(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops3::apply(&self.table, x, y, self.n1, self.n2, self.n3)
	}

	pub fn apply_transpose(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops3::apply_transpose(&self.table, x, y, self.n1, self.n2, self.n3)
	}

	pub fn apply_inverse(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops3::apply_inverse(&self.table, x, y, self.n1, self.n2, self.n3)
	}

	pub fn apply_inverse_transpose(&self, x: &[f64], y: &mut [f64]) -> Result<(), FilterError> {
		ops3::apply_inverse_transpose(&self.table, x, y, self.n1, self.n2, self.n3)
	}

	/// Run Wilson-Burg factorization against the autocorrelation `r`
	/// (odd extent in all three dimensions, centered at its middle indices).
	pub fn factorize(&mut self, maxiter: u32, eps: f64, r: &Grid3) -> Result<(), FilterError> {
		wilson_burg::factorize_3d(&mut self.table, maxiter, eps, r)
	}
}
