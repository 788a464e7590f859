// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
The finite linear convolution / cross-correlation collaborator named as
an external interface in the filter engine's contract (not needed by the
recursive core itself, which works directly off the lag table, but used
by callers composing the core with FIR design elsewhere in the library).

`correlate` computes `z[i] = sum_j x[j] * y[i - j]` over explicit
lengths/origins, zero-extended at the edges - the same direct
double-loop shape as a textbook time-domain cross-correlation.
*/

/// Linear convolution `z[i] = sum_j x[j] * y[i - j]` for `i` in
/// `0 .. lz`, with `x`/`y` indexed from their given origins `ox`/`oy`
/// and zero-extended outside `[0, lx)`/`[0, ly)`.
pub fn convolve(lx: usize, ox: i64, x: &[f64], ly: usize, oy: i64, y: &[f64], lz: usize) -> Vec<f64> {
	let mut z = vec![0.0; lz];
	for i in 0..lz {
		let mut sum = 0.0;
		for j in 0..lx {
			let xi = j as i64 + ox;
			let yi = i as i64 - xi + oy;
			if yi >= 0 && (yi as usize) < ly {
				sum += x[j] * y[yi as usize];
			}
		}
		z[i] = sum;
	}
	z
}

/// Cross-correlation `z[lag] = sum_n x[n] * y[n + lag]` for `lag` in
/// `-max_lag ..= max_lag`, returned as a vector of length
/// `2 * max_lag + 1` with index 0 corresponding to `lag = -max_lag`.
pub fn correlate(x: &[f64], y: &[f64], max_lag: usize) -> Vec<f64> {
	let n = x.len().max(y.len());
	let len = 2 * max_lag + 1;
	let mut result = vec![0.0; len];
	for (out_i, lag) in (-(max_lag as i64)..=(max_lag as i64)).enumerate() {
		let mut sum = 0.0;
		for k in 0..n {
			let m = k as i64 + lag;
			if m >= 0 && (m as usize) < y.len() && k < x.len() {
				sum += x[k] * y[m as usize];
			}
		}
		result[out_i] = sum;
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn convolve_matches_direct_sum() {
		let x = vec![1.0, 2.0, 3.0];
		let y = vec![0.0, 1.0, 0.5];
		let z = convolve(3, 0, &x, 3, 0, &y, 5);
		// z[i] = sum_j x[j]*y[i-j]
		let expected = vec![0.0, 1.0, 2.5, 4.0, 1.5];
		for (a, b) in z.iter().zip(expected.iter()) {
			assert!((a - b).abs() < 1e-12);
		}
	}

	#[test]
	fn correlate_peaks_at_true_lag() {
		// y is x delayed by 2 samples.
		let x = vec![0.0, 1.0, 2.0, -1.0, 0.5, 0.0, 0.0, 0.0];
		let mut y = vec![0.0; x.len()];
		for i in 2..x.len() {
			y[i] = x[i - 2];
		}
		let r = correlate(&x, &y, 4);
		let (peak_i, _) = r.iter().enumerate()
			.max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
			.unwrap();
		let peak_lag = peak_i as i64 - 4;
		assert_eq!(peak_lag, 2);
	}
}
