// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

#![forbid(unsafe_code)]
#![cfg_attr(test, deny(warnings))]

/*!
Causal multidimensional recursive filters over non-symmetric half-plane
(NSHP) lag stencils.

A filter is a sparse stencil of integer lags and real coefficients, one
coefficient pinned at the origin (`a0`, never zero), the rest placed so
that every nonzero tap lies at or "before" the origin in NSHP order -
the natural generalization of one-dimensional causality to two and three
dimensions. [`Filter1`], [`Filter2`] and [`Filter3`] each wrap such a
stencil for their dimensionality and expose the four linear operators
built from it:

- [`Filter1::apply`] / [`Filter2::apply`] / [`Filter3::apply`]: the
  forward causal convolution `A`.
- `apply_transpose`: the adjoint, anti-causal convolution `A^T`.
- `apply_inverse`: the causal recursion that inverts `apply`.
- `apply_inverse_transpose`: the adjoint recursion that inverts
  `apply_transpose`.

All four accept aliased source and destination slices (`x` and `y` may
be the same buffer) and are exact inverses of one another on any finite
grid under zero-extension at the boundary.

`factorize` runs the iterative Wilson-Burg spectral factorization:
given a symmetric autocorrelation sampled on an odd-extent grid, it
updates the filter's coefficients in place so that the cascade of `A`
with its adjoint reproduces the autocorrelation at every lag in the
stencil - the minimum-phase causal factor of that autocorrelation.

```
use mosaic_filt::{Filter1, Grid1};

let mut f = Filter1::new(vec![0, 1], None).unwrap();
let r = Grid1::from_vec(vec![-0.5, 1.25, -0.5]);
f.factorize(50, 1e-8, &r).unwrap();

let x = vec![1.0, 0.0, 0.0, 0.0];
let mut y = vec![0.0; 4];
f.apply(&x, &mut y).unwrap();
```
*/

mod error;
mod grid;
mod lag_table;
mod zones;
mod ops1;
mod ops2;
mod ops3;
mod conv;
mod filter;
mod wilson_burg;

pub use crate::error::{FilterError, LagTableError};
pub use crate::grid::{Grid1, Grid2, Grid3};
pub use crate::lag_table::{LagTable1, LagTable2, LagTable3};
pub use crate::filter::{Filter1, Filter2, Filter3};
pub use crate::conv::{convolve, correlate};
