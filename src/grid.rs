// Causal multidimensional recursive filter engine
//
// Copyright (c) 2016 est31 <MTest31@outlook.com>
// and contributors. All rights reserved.
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
Dense owned multidimensional buffers, addressed row-major with the
slowest-varying dimension outermost (dimension `D` outer, dimension 1
innermost). This is the array-utility collaborator named in the filter
engine's external-interfaces contract: allocation, zero-fill, copy with
offset, and the elementwise/reduction helpers the Wilson-Burg driver
needs on its internal workspace.
*/

/// A dense owned 1-D buffer of reals.
#[derive(Debug, Clone)]
pub struct Grid1 {
	data: Vec<f64>,
}

impl Grid1 {
	pub fn zeros(n: usize) -> Grid1 {
		Grid1 { data: vec![0.0; n] }
	}

	pub fn from_vec(data: Vec<f64>) -> Grid1 {
		Grid1 { data }
	}

	pub fn n(&self) -> usize { self.data.len() }
	pub fn as_slice(&self) -> &[f64] { &self.data }
	pub fn as_mut_slice(&mut self) -> &mut [f64] { &mut self.data }

	pub fn get(&self, i: i64) -> f64 {
		if i < 0 || i as usize >= self.data.len() { 0.0 } else { self.data[i as usize] }
	}

	/// Copy `src` into `self` such that `src`'s center sample (its own
	/// middle index, `src.n() / 2`, valid for odd-length autocorrelation
	/// buffers) lands at `dst_center` in `self`.
	pub fn copy_centered(&mut self, src: &Grid1, dst_center: usize) {
		let src_center = src.n() / 2;
		for i in 0..src.n() {
			let offset = i as i64 - src_center as i64;
			let dst_i = dst_center as i64 + offset;
			if dst_i >= 0 && (dst_i as usize) < self.data.len() {
				self.data[dst_i as usize] = src.data[i];
			}
		}
	}

	pub fn max_abs_diff(&self, other: &Grid1) -> f64 {
		assert_eq!(self.data.len(), other.data.len());
		self.data.iter().zip(other.data.iter())
			.map(|(a, b)| (a - b).abs())
			.fold(0.0_f64, f64::max)
	}

	pub fn dot(&self, other: &Grid1) -> f64 {
		assert_eq!(self.data.len(), other.data.len());
		self.data.iter().zip(other.data.iter()).map(|(a, b)| a * b).sum()
	}
}

/// A dense owned 2-D buffer, `n2` rows (dimension 2, outer) by `n1`
/// columns (dimension 1, inner).
#[derive(Debug, Clone)]
pub struct Grid2 {
	data: Vec<f64>,
	n1: usize,
	n2: usize,
}

impl Grid2 {
	pub fn zeros(n1: usize, n2: usize) -> Grid2 {
		Grid2 { data: vec![0.0; n1 * n2], n1, n2 }
	}

	/// Wrap a flat row-major buffer (`idx(i1, i2) = i2 * n1 + i1`) directly.
	pub fn from_vec(data: Vec<f64>, n1: usize, n2: usize) -> Grid2 {
		assert_eq!(data.len(), n1 * n2);
		Grid2 { data, n1, n2 }
	}

	pub fn n1(&self) -> usize { self.n1 }
	pub fn n2(&self) -> usize { self.n2 }
	pub fn as_slice(&self) -> &[f64] { &self.data }
	pub fn as_mut_slice(&mut self) -> &mut [f64] { &mut self.data }

	#[inline]
	fn idx(&self, i1: usize, i2: usize) -> usize { i2 * self.n1 + i1 }

	pub fn get(&self, i1: i64, i2: i64) -> f64 {
		if i1 < 0 || i2 < 0 || i1 as usize >= self.n1 || i2 as usize >= self.n2 {
			0.0
		} else {
			self.data[self.idx(i1 as usize, i2 as usize)]
		}
	}

	pub fn set(&mut self, i1: usize, i2: usize, v: f64) {
		let idx = self.idx(i1, i2);
		self.data[idx] = v;
	}

	pub fn copy_centered(&mut self, src: &Grid2, c1: usize, c2: usize) {
		let sc1 = src.n1 / 2;
		let sc2 = src.n2 / 2;
		for s2 in 0..src.n2 {
			let o2 = s2 as i64 - sc2 as i64;
			let d2 = c2 as i64 + o2;
			if d2 < 0 || d2 as usize >= self.n2 { continue; }
			for s1 in 0..src.n1 {
				let o1 = s1 as i64 - sc1 as i64;
				let d1 = c1 as i64 + o1;
				if d1 < 0 || d1 as usize >= self.n1 { continue; }
				let v = src.data[src.idx(s1, s2)];
				self.set(d1 as usize, d2 as usize, v);
			}
		}
	}

	pub fn max_abs_diff(&self, other: &Grid2) -> f64 {
		assert_eq!(self.data.len(), other.data.len());
		self.data.iter().zip(other.data.iter())
			.map(|(a, b)| (a - b).abs())
			.fold(0.0_f64, f64::max)
	}
}

/// A dense owned 3-D buffer, `n3` slabs (outer) of `n2` rows of `n1`
/// columns (inner).
#[derive(Debug, Clone)]
pub struct Grid3 {
	data: Vec<f64>,
	n1: usize,
	n2: usize,
	n3: usize,
}

impl Grid3 {
	pub fn zeros(n1: usize, n2: usize, n3: usize) -> Grid3 {
		Grid3 { data: vec![0.0; n1 * n2 * n3], n1, n2, n3 }
	}

	/// Wrap a flat row-major buffer (`idx(i1, i2, i3) = (i3 * n2 + i2) * n1 + i1`) directly.
	pub fn from_vec(data: Vec<f64>, n1: usize, n2: usize, n3: usize) -> Grid3 {
		assert_eq!(data.len(), n1 * n2 * n3);
		Grid3 { data, n1, n2, n3 }
	}

	pub fn n1(&self) -> usize { self.n1 }
	pub fn n2(&self) -> usize { self.n2 }
	pub fn n3(&self) -> usize { self.n3 }
	pub fn as_slice(&self) -> &[f64] { &self.data }
	pub fn as_mut_slice(&mut self) -> &mut [f64] { &mut self.data }

	#[inline]
	fn idx(&self, i1: usize, i2: usize, i3: usize) -> usize {
		(i3 * self.n2 + i2) * self.n1 + i1
	}

	pub fn get(&self, i1: i64, i2: i64, i3: i64) -> f64 {
		if i1 < 0 || i2 < 0 || i3 < 0
				|| i1 as usize >= self.n1 || i2 as usize >= self.n2 || i3 as usize >= self.n3 {
			0.0
		} else {
			self.data[self.idx(i1 as usize, i2 as usize, i3 as usize)]
		}
	}

	pub fn set(&mut self, i1: usize, i2: usize, i3: usize, v: f64) {
		let idx = self.idx(i1, i2, i3);
		self.data[idx] = v;
	}

	pub fn copy_centered(&mut self, src: &Grid3, c1: usize, c2: usize, c3: usize) {
		let sc1 = src.n1 / 2;
		let sc2 = src.n2 / 2;
		let sc3 = src.n3 / 2;
		for s3 in 0..src.n3 {
			let d3 = c3 as i64 + (s3 as i64 - sc3 as i64);
			if d3 < 0 || d3 as usize >= self.n3 { continue; }
			for s2 in 0..src.n2 {
				let d2 = c2 as i64 + (s2 as i64 - sc2 as i64);
				if d2 < 0 || d2 as usize >= self.n2 { continue; }
				for s1 in 0..src.n1 {
					let d1 = c1 as i64 + (s1 as i64 - sc1 as i64);
					if d1 < 0 || d1 as usize >= self.n1 { continue; }
					let v = src.data[src.idx(s1, s2, s3)];
					self.set(d1 as usize, d2 as usize, d3 as usize, v);
				}
			}
		}
	}

	pub fn max_abs_diff(&self, other: &Grid3) -> f64 {
		assert_eq!(self.data.len(), other.data.len());
		self.data.iter().zip(other.data.iter())
			.map(|(a, b)| (a - b).abs())
			.fold(0.0_f64, f64::max)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn grid1_zero_extension() {
		let g = Grid1::from_vec(vec![1.0, 2.0, 3.0]);
		assert_eq!(g.get(-1), 0.0);
		assert_eq!(g.get(0), 1.0);
		assert_eq!(g.get(2), 3.0);
		assert_eq!(g.get(3), 0.0);
	}

	#[test]
	fn grid2_index_layout() {
		let mut g = Grid2::zeros(3, 2);
		g.set(0, 0, 1.0);
		g.set(2, 1, 9.0);
		assert_eq!(g.as_slice()[0], 1.0);
		assert_eq!(g.as_slice()[5], 9.0);
	}

	#[test]
	fn grid1_copy_centered() {
		let src = Grid1::from_vec(vec![-0.5, 1.25, -0.5]);
		let mut dst = Grid1::zeros(7);
		dst.copy_centered(&src, 3);
		assert_eq!(dst.as_slice(), &[0.0, 0.0, -0.5, 1.25, -0.5, 0.0, 0.0]);
	}

	#[test]
	fn grid1_max_abs_diff_and_dot() {
		let a = Grid1::from_vec(vec![1.0, 2.0, 3.0]);
		let b = Grid1::from_vec(vec![1.0, 2.5, 2.0]);
		assert_eq!(a.max_abs_diff(&b), 1.0);
		assert_eq!(a.dot(&b), 1.0 * 1.0 + 2.0 * 2.5 + 3.0 * 2.0);
	}

	#[test]
	fn grid2_from_vec_max_abs_diff() {
		let a = Grid2::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
		let b = Grid2::from_vec(vec![1.0, 2.0, 3.0, 10.0], 2, 2);
		assert_eq!(a.max_abs_diff(&b), 6.0);
	}

	#[test]
	fn grid3_from_vec_max_abs_diff() {
		let a = Grid3::from_vec(vec![0.0; 8], 2, 2, 2);
		let mut b_data = vec![0.0; 8];
		b_data[5] = -2.5;
		let b = Grid3::from_vec(b_data, 2, 2, 2);
		assert_eq!(a.max_abs_diff(&b), 2.5);
	}
}
