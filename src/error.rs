// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
Error types for lag table construction and for the operator kernels /
Wilson-Burg driver built on top of a lag table.
*/

use std::error;
use std::fmt;

/// Errors that can occur while constructing a lag table.
#[derive(Debug, PartialEq)]
pub enum LagTableError {
	/// The parallel lag arrays (and, if given, the coefficient array)
	/// don't all have the same length.
	LengthMismatch,
	/// No lags were given at all.
	Empty,
	/// The first lag (index 0) is not the origin.
	OriginNonZero,
	/// A lag at the given index violates the NSHP causality ordering
	/// required of every lag but the origin.
	NotCausal { index: usize },
}

impl error::Error for LagTableError {}

impl fmt::Display for LagTableError {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			LagTableError::LengthMismatch =>
				write!(fmt, "lag and coefficient arrays have mismatched lengths"),
			LagTableError::Empty =>
				write!(fmt, "lag table has no entries"),
			LagTableError::OriginNonZero =>
				write!(fmt, "the first lag must be the origin (all zero)"),
			LagTableError::NotCausal { index } =>
				write!(fmt, "lag at index {} is not NSHP-causal", index),
		}
	}
}

/// Errors that can occur while applying an operator kernel or running
/// the Wilson-Burg factorization.
#[derive(Debug, PartialEq)]
pub enum FilterError {
	/// The lag table backing this filter failed validation.
	BadLagTable(LagTableError),
	/// Source and destination buffers (or the autocorrelation buffer
	/// handed to `factorize`) don't have the extents the operator expects.
	ShapeMismatch {
		expected: Vec<usize>,
		actual: Vec<usize>,
	},
	/// Wilson-Burg did not converge within the iteration budget. Carries
	/// the number of iterations actually run; the lag table's coefficients
	/// are left at their last in-progress value.
	NotConverged { iterations: u32 },
	/// The pinned coefficient `a0` became zero during factorization,
	/// making the causal recursion impossible to invert.
	DegenerateCoefficient,
	/// A lag fell outside the zero-padded Wilson-Burg workspace. Only
	/// possible for lag sets large relative to the padding.
	LagOutsidePaddedWorkspace,
}

impl From<LagTableError> for FilterError {
	fn from(err: LagTableError) -> FilterError {
		FilterError::BadLagTable(err)
	}
}

impl error::Error for FilterError {}

impl fmt::Display for FilterError {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		match self {
			FilterError::BadLagTable(e) =>
				write!(fmt, "bad lag table: {}", e),
			FilterError::ShapeMismatch { expected, actual } =>
				write!(fmt, "shape mismatch: expected extents {:?}, got {:?}", expected, actual),
			FilterError::NotConverged { iterations } =>
				write!(fmt, "factorization did not converge after {} iterations", iterations),
			FilterError::DegenerateCoefficient =>
				write!(fmt, "pinned coefficient a0 is zero, cannot invert"),
			FilterError::LagOutsidePaddedWorkspace =>
				write!(fmt, "lag fell outside the padded Wilson-Burg workspace"),
		}
	}
}
