// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
The stencil data structure: parallel arrays of integer lags plus their
coefficients, one struct per dimensionality. Construction validates the
non-symmetric half-plane (NSHP) causality invariant once; the shape is
permanent afterwards, while coefficients may be freely overwritten (by
`wilson_burg::factorize_*`) for the lifetime of the table.
*/

use crate::error::LagTableError;

fn unit_impulse(m: usize) -> Vec<f64> {
	let mut c = vec![0.0; m];
	c[0] = 1.0;
	c
}

fn min_max(lags: &[i32]) -> (i32, i32) {
	let mut lo = lags[0];
	let mut hi = lags[0];
	for &l in lags {
		if l < lo { lo = l; }
		if l > hi { hi = l; }
	}
	(lo, hi)
}

/// A validated 1-D causal stencil: `lags[0] == 0`, `lags[j] > 0` for `j >= 1`.
#[derive(Debug, Clone)]
pub struct LagTable1 {
	lags: Vec<i32>,
	coeffs: Vec<f64>,
	min: i32,
	max: i32,
}

impl LagTable1 {
	/// Construct from a lag array and optional coefficients. If `coeffs`
	/// is `None`, the table is initialized to the unit impulse (`a0 = 1`,
	/// all other coefficients zero).
	pub fn new(lags: Vec<i32>, coeffs: Option<Vec<f64>>) -> Result<LagTable1, LagTableError> {
		if lags.is_empty() {
			return Err(LagTableError::Empty);
		}
		let coeffs = coeffs.unwrap_or_else(|| unit_impulse(lags.len()));
		if lags.len() != coeffs.len() {
			return Err(LagTableError::LengthMismatch);
		}
		if lags[0] != 0 {
			return Err(LagTableError::OriginNonZero);
		}
		for (j, &l) in lags.iter().enumerate().skip(1) {
			if l <= 0 {
				return Err(LagTableError::NotCausal { index: j });
			}
		}
		let (min, max) = min_max(&lags);
		Ok(LagTable1 { lags, coeffs, min, max })
	}

	/// Number of stencil taps.
	pub fn len(&self) -> usize { self.lags.len() }
	pub fn is_empty(&self) -> bool { false }
	/// Defensive copy of the lag array.
	pub fn lags(&self) -> Vec<i32> { self.lags.clone() }
	/// Defensive copy of the coefficient vector.
	pub fn coeffs(&self) -> Vec<f64> { self.coeffs.clone() }
	/// The pinned zero-lag coefficient.
	pub fn a0(&self) -> f64 { self.coeffs[0] }
	pub fn min(&self) -> i32 { self.min }
	pub fn max(&self) -> i32 { self.max }

	pub(crate) fn lag(&self, j: usize) -> i32 { self.lags[j] }
	pub(crate) fn coeff(&self, j: usize) -> f64 { self.coeffs[j] }

	/// Overwrite the coefficients in place. Shape (lag count) is unchanged;
	/// a `coeffs` vector of the wrong length is rejected rather than
	/// silently accepted.
	pub fn set_coeffs(&mut self, coeffs: Vec<f64>) -> Result<(), LagTableError> {
		if coeffs.len() != self.lags.len() {
			return Err(LagTableError::LengthMismatch);
		}
		self.coeffs = coeffs;
		Ok(())
	}
}

/// A validated 2-D causal stencil. For `j >= 1`: `lags2[j] >= 0`, and
/// `lags1[j] > 0` whenever `lags2[j] == 0`.
#[derive(Debug, Clone)]
pub struct LagTable2 {
	lags1: Vec<i32>,
	lags2: Vec<i32>,
	coeffs: Vec<f64>,
	min1: i32, max1: i32,
	min2: i32, max2: i32,
}

impl LagTable2 {
	pub fn new(lags1: Vec<i32>, lags2: Vec<i32>, coeffs: Option<Vec<f64>>)
			-> Result<LagTable2, LagTableError> {
		if lags1.is_empty() {
			return Err(LagTableError::Empty);
		}
		if lags1.len() != lags2.len() {
			return Err(LagTableError::LengthMismatch);
		}
		let coeffs = coeffs.unwrap_or_else(|| unit_impulse(lags1.len()));
		if lags1.len() != coeffs.len() {
			return Err(LagTableError::LengthMismatch);
		}
		if lags1[0] != 0 || lags2[0] != 0 {
			return Err(LagTableError::OriginNonZero);
		}
		for j in 1..lags1.len() {
			let (l1, l2) = (lags1[j], lags2[j]);
			let causal = if l2 > 0 {
				true
			} else if l2 == 0 {
				l1 > 0
			} else {
				false
			};
			if !causal {
				return Err(LagTableError::NotCausal { index: j });
			}
		}
		let (min1, max1) = min_max(&lags1);
		let (min2, max2) = min_max(&lags2);
		Ok(LagTable2 { lags1, lags2, coeffs, min1, max1, min2, max2 })
	}

	pub fn len(&self) -> usize { self.lags1.len() }
	pub fn is_empty(&self) -> bool { false }
	pub fn lags1(&self) -> Vec<i32> { self.lags1.clone() }
	pub fn lags2(&self) -> Vec<i32> { self.lags2.clone() }
	pub fn coeffs(&self) -> Vec<f64> { self.coeffs.clone() }
	pub fn a0(&self) -> f64 { self.coeffs[0] }
	pub fn min1(&self) -> i32 { self.min1 }
	pub fn max1(&self) -> i32 { self.max1 }
	pub fn min2(&self) -> i32 { self.min2 }
	pub fn max2(&self) -> i32 { self.max2 }

	pub(crate) fn lag1(&self, j: usize) -> i32 { self.lags1[j] }
	pub(crate) fn lag2(&self, j: usize) -> i32 { self.lags2[j] }
	pub(crate) fn coeff(&self, j: usize) -> f64 { self.coeffs[j] }

	pub fn set_coeffs(&mut self, coeffs: Vec<f64>) -> Result<(), LagTableError> {
		if coeffs.len() != self.lags1.len() {
			return Err(LagTableError::LengthMismatch);
		}
		self.coeffs = coeffs;
		Ok(())
	}
}

/// A validated 3-D causal stencil. For `j >= 1`: `lags3[j] >= 0`; if
/// `lags3[j] == 0` then `lags2[j] >= 0`; if both are zero then
/// `lags1[j] > 0`.
#[derive(Debug, Clone)]
pub struct LagTable3 {
	lags1: Vec<i32>,
	lags2: Vec<i32>,
	lags3: Vec<i32>,
	coeffs: Vec<f64>,
	min1: i32, max1: i32,
	min2: i32, max2: i32,
	min3: i32, max3: i32,
}

impl LagTable3 {
	pub fn new(lags1: Vec<i32>, lags2: Vec<i32>, lags3: Vec<i32>, coeffs: Option<Vec<f64>>)
			-> Result<LagTable3, LagTableError> {
		if lags1.is_empty() {
			return Err(LagTableError::Empty);
		}
		if lags1.len() != lags2.len() || lags1.len() != lags3.len() {
			return Err(LagTableError::LengthMismatch);
		}
		let coeffs = coeffs.unwrap_or_else(|| unit_impulse(lags1.len()));
		if lags1.len() != coeffs.len() {
			return Err(LagTableError::LengthMismatch);
		}
		if lags1[0] != 0 || lags2[0] != 0 || lags3[0] != 0 {
			return Err(LagTableError::OriginNonZero);
		}
		for j in 1..lags1.len() {
			let (l1, l2, l3) = (lags1[j], lags2[j], lags3[j]);
			let causal = if l3 > 0 {
				true
			} else if l3 == 0 {
				if l2 > 0 {
					true
				} else if l2 == 0 {
					l1 > 0
				} else {
					false
				}
			} else {
				false
			};
			if !causal {
				return Err(LagTableError::NotCausal { index: j });
			}
		}
		let (min1, max1) = min_max(&lags1);
		let (min2, max2) = min_max(&lags2);
		let (min3, max3) = min_max(&lags3);
		Ok(LagTable3 { lags1, lags2, lags3, coeffs, min1, max1, min2, max2, min3, max3 })
	}

	pub fn len(&self) -> usize { self.lags1.len() }
	pub fn is_empty(&self) -> bool { false }
	pub fn lags1(&self) -> Vec<i32> { self.lags1.clone() }
	pub fn lags2(&self) -> Vec<i32> { self.lags2.clone() }
	pub fn lags3(&self) -> Vec<i32> { self.lags3.clone() }
	pub fn coeffs(&self) -> Vec<f64> { self.coeffs.clone() }
	pub fn a0(&self) -> f64 { self.coeffs[0] }
	pub fn min1(&self) -> i32 { self.min1 }
	pub fn max1(&self) -> i32 { self.max1 }
	pub fn min2(&self) -> i32 { self.min2 }
	pub fn max2(&self) -> i32 { self.max2 }
	pub fn min3(&self) -> i32 { self.min3 }
	pub fn max3(&self) -> i32 { self.max3 }

	pub(crate) fn lag1(&self, j: usize) -> i32 { self.lags1[j] }
	pub(crate) fn lag2(&self, j: usize) -> i32 { self.lags2[j] }
	pub(crate) fn lag3(&self, j: usize) -> i32 { self.lags3[j] }
	pub(crate) fn coeff(&self, j: usize) -> f64 { self.coeffs[j] }

	pub fn set_coeffs(&mut self, coeffs: Vec<f64>) -> Result<(), LagTableError> {
		if coeffs.len() != self.lags1.len() {
			return Err(LagTableError::LengthMismatch);
		}
		self.coeffs = coeffs;
		Ok(())
	}
}
