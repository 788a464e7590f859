// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

use mosaic_filt::{Filter1, Filter2, FilterError, Grid1};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

#[test]
fn two_tap_unit_impulse_scenarios() {
	let f = Filter1::new(vec![0, 1], Some(vec![1.0, -0.5])).unwrap();
	let x = vec![1.0, 0.0, 0.0, 0.0];

	let mut y = vec![0.0; 4];
	f.apply(&x, &mut y).unwrap();
	assert_eq!(y, vec![1.0, -0.5, 0.0, 0.0]);

	let mut inv = vec![0.0; 4];
	f.apply_inverse(&x, &mut inv).unwrap();
	assert_eq!(inv, vec![1.0, 0.5, 0.25, 0.125]);

	let x_end = vec![0.0, 0.0, 0.0, 1.0];
	let mut t = vec![0.0; 4];
	f.apply_transpose(&x_end, &mut t).unwrap();
	assert_eq!(t, vec![0.0, 0.0, -0.5, 1.0]);
}

#[test]
fn wilson_burg_two_tap_converges_to_known_coefficients() {
	let mut f = Filter1::new(vec![0, 1], None).unwrap();
	let r = Grid1::from_vec(vec![-0.5, 1.25, -0.5]);
	f.factorize(50, 1e-8, &r).unwrap();
	let coeffs = f.lag_table().coeffs();
	assert!((coeffs[0] - 1.0).abs() < 1e-5, "a0 = {}", coeffs[0]);
	assert!((coeffs[1] - (-0.5)).abs() < 1e-5, "a1 = {}", coeffs[1]);
}

#[test]
fn adjoint_identity_holds_for_public_api() {
	let f = Filter1::new(vec![0, 2, 3], Some(vec![1.0, 0.3, -0.2])).unwrap();
	let x: Vec<f64> = (0..20).map(|i| (i as f64 * 0.31).sin()).collect();
	let y: Vec<f64> = (0..20).map(|i| (i as f64 * 0.59).cos()).collect();

	let mut ax = vec![0.0; 20];
	f.apply(&x, &mut ax).unwrap();
	let mut aty = vec![0.0; 20];
	f.apply_transpose(&y, &mut aty).unwrap();

	let lhs = Grid1::from_vec(ax).dot(&Grid1::from_vec(y));
	let rhs = Grid1::from_vec(x).dot(&Grid1::from_vec(aty));
	assert!((lhs - rhs).abs() < 1e-9, "{} vs {}", lhs, rhs);
}

#[test]
fn in_place_application_matches_two_buffer_application() {
	let f = Filter1::new(vec![0, 1, 4], Some(vec![1.0, -0.4, 0.1])).unwrap();
	let x: Vec<f64> = (0..16).map(|i| (i as f64 * 0.77).sin() - 0.2).collect();

	let mut via_copy = vec![0.0; x.len()];
	f.apply(&x, &mut via_copy).unwrap();

	let mut aliased = x.clone();
	let aliased_snapshot = aliased.clone();
	f.apply(&aliased_snapshot, &mut aliased).unwrap();
	assert_eq!(via_copy, aliased);
}

#[test]
fn forward_then_inverse_is_exact_for_nonnegative_lag_stencil() {
	let f = Filter1::new(vec![0, 1, 3], Some(vec![1.0, -0.3, 0.2])).unwrap();
	let x: Vec<f64> = (0..32).map(|i| ((i as f64) * 0.17).cos() * 2.0 - 1.0).collect();
	let mut y = vec![0.0; x.len()];
	f.apply(&x, &mut y).unwrap();
	let mut back = vec![0.0; x.len()];
	f.apply_inverse(&y, &mut back).unwrap();
	for i in 0..x.len() {
		assert!((back[i] - x[i]).abs() < 1e-9, "index {}: {} vs {}", i, back[i], x[i]);
	}
}

#[test]
fn causal_filter_preserves_a_leading_zero_prefix() {
	let f = Filter1::new(vec![0, 2], Some(vec![1.0, 0.5])).unwrap();
	let x = vec![0.0, 0.0, 0.0, 1.0, 2.0, -1.0];
	let mut y = vec![0.0; x.len()];
	f.apply(&x, &mut y).unwrap();
	assert_eq!(&y[0..3], &[0.0, 0.0, 0.0]);
}

#[test]
fn shape_mismatch_is_reported_for_2d_factorization() {
	let mut f = Filter2::new(5, 5, vec![0, 1, 0, 1], vec![0, 0, 1, 1], None).unwrap();
	let r = mosaic_filt::Grid2::zeros(4, 3); // even extents: invalid.
	let err = f.factorize(20, 1e-8, &r).unwrap_err();
	assert!(matches!(err, FilterError::ShapeMismatch { .. }));
}

/// Lags `0..=max_lag` of the autocorrelation of `x`, via the
/// Wiener-Khinchin theorem: FFT, take the squared magnitude (the power
/// spectrum), inverse FFT.
fn autocorrelation_via_fft(x: &[f64], max_lag: usize) -> Vec<f64> {
	let n = (x.len() * 2).next_power_of_two();
	let mut buf: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
	buf.resize(n, Complex::new(0.0, 0.0));

	let mut planner = FftPlanner::new();
	planner.plan_fft_forward(n).process(&mut buf);
	for c in buf.iter_mut() {
		*c = Complex::new(c.norm_sqr(), 0.0);
	}
	planner.plan_fft_inverse(n).process(&mut buf);

	let scale = 1.0 / (n as f64 * x.len() as f64);
	(0..=max_lag).map(|lag| buf[lag].re * scale).collect()
}

#[test]
fn wilson_burg_factorizes_an_fft_derived_autocorrelation() {
	let mut seed: u64 = 0x9E3779B97F4A7C15;
	let mut next = move || {
		seed ^= seed << 13;
		seed ^= seed >> 7;
		seed ^= seed << 17;
		((seed >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
	};
	let x: Vec<f64> = (0..64).map(|_| next()).collect();

	let r = autocorrelation_via_fft(&x, 1);
	let autocorr = Grid1::from_vec(vec![r[1], r[0], r[1]]);

	let mut f = Filter1::new(vec![0, 1], None).unwrap();
	f.factorize(200, 1e-6, &autocorr).unwrap();
	assert!(f.lag_table().a0() > 0.0);
}

#[test]
fn two_dimensional_causal_support_matches_the_quad_stencil() {
	let f = Filter2::new(6, 6, vec![0, 1, 0, 1], vec![0, 0, 1, 1],
		Some(vec![1.0, -0.25, -0.25, 0.1])).unwrap();
	let (n1, n2) = f.shape();
	let mut x = vec![0.0; n1 * n2];
	x[3 * n1 + 2] = 1.0; // impulse at (i1=2, i2=3)
	let mut y = vec![0.0; n1 * n2];
	f.apply(&x, &mut y).unwrap();
	for i2 in 0..n2 {
		for i1 in 0..n1 {
			let expect_nonzero = matches!((i1, i2), (2, 3) | (3, 3) | (2, 4) | (3, 4));
			let v = y[i2 * n1 + i1];
			if expect_nonzero {
				assert!(v != 0.0, "expected nonzero at ({}, {})", i1, i2);
			} else {
				assert_eq!(v, 0.0, "expected zero at ({}, {})", i1, i2);
			}
		}
	}
}
