// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{ImageRef, ImageRefMut, Region, FuzzyZero, round_channel};

/// An edges processing mode used by `convolve_matrix`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum EdgeMode {
    /// Samples outside the region are skipped.
    None,
    /// Samples are clamped to the region edges.
    Duplicate,
    /// Samples are wrapped around the region.
    Wrap,
}

impl Default for EdgeMode {
    fn default() -> Self {
        EdgeMode::Duplicate
    }
}

/// A convolve matrix used by `convolve_matrix`.
#[derive(Clone, Debug)]
pub struct ConvolveMatrix<'a> {
    x: u32,
    y: u32,
    columns: u32,
    rows: u32,
    data: &'a [f64],
}

impl<'a> ConvolveMatrix<'a> {
    /// Creates a new `ConvolveMatrix`.
    ///
    /// Returns `None` when:
    ///
    /// - `columns` * `rows` != `data.len()`
    /// - `target_x` >= `columns`
    /// - `target_y` >= `rows`
    pub fn new(target_x: u32, target_y: u32, columns: u32, rows: u32, data: &'a [f64]) -> Option<Self> {
        if    (columns * rows) as usize != data.len()
           || target_x >= columns
           || target_y >= rows
        {
            return None;
        }

        Some(ConvolveMatrix {
            x: target_x,
            y: target_y,
            columns,
            rows,
            data,
        })
    }

    /// Creates an empty matrix.
    ///
    /// Every sum over it is zero.
    pub fn empty() -> Self {
        ConvolveMatrix { x: 0, y: 0, columns: 0, rows: 0, data: &[] }
    }

    /// Returns a matrix's X target.
    ///
    /// `targetX` in the SVG.
    #[inline]
    pub fn target_x(&self) -> u32 {
        self.x
    }

    /// Returns a matrix's Y target.
    ///
    /// `targetY` in the SVG.
    #[inline]
    pub fn target_y(&self) -> u32 {
        self.y
    }

    /// Returns a number of columns in the matrix.
    ///
    /// Part of the `order` attribute in the SVG.
    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns a number of rows in the matrix.
    ///
    /// Part of the `order` attribute in the SVG.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns a matrix value at the specified position.
    ///
    /// # Panics
    ///
    /// - When position is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[(y * self.columns + x) as usize]
    }

    /// Returns a reference to an internal data.
    #[inline]
    pub fn data(&self) -> &[f64] {
        self.data
    }
}

// Sample positions are clamped to this before the integer edge math.
const SAMPLE_LIMIT: f64 = 1e15;

/// Applies a convolve matrix.
///
/// Sums are computed on raw 8-bit samples: `sum / divisor + bias`, clamped to `0..=255`.
/// The kernel is rotated by 180° and sampled every `unit` pixels.
/// When `preserve_alpha` is set, alpha is copied from `src`.
///
/// # Panics
///
/// When `src` and `dest` have different sizes.
pub fn convolve_matrix(
    matrix: ConvolveMatrix,
    divisor: f64,
    bias: f64,
    unit: (f64, f64),
    edge_mode: EdgeMode,
    preserve_alpha: bool,
    src: ImageRef,
    region: Region,
    mut dest: ImageRefMut,
) {
    let divisor = if divisor.is_fuzzy_zero() { 1.0 } else { divisor };

    assert!(src.same_size(&dest));

    let region = region.fit_to(dest.width, dest.height);
    if region.is_empty() {
        return;
    }

    // Maps a sample coordinate into the region, or `None` to skip it.
    let fit = |v: f64, min: i32, max: i32| -> Option<u32> {
        let v = v.max(-SAMPLE_LIMIT).min(SAMPLE_LIMIT) as i64;
        let (min, max) = (min as i64, max as i64);
        let v = if v >= min && v < max {
            v
        } else {
            match edge_mode {
                EdgeMode::None => return None,
                EdgeMode::Duplicate => if v < min { min } else { max - 1 },
                EdgeMode::Wrap => min + (v - min).rem_euclid(max - min),
            }
        };

        Some(v as u32)
    };

    let (unit_x, unit_y) = unit;
    for y in region.rows() {
        for x in region.columns() {
            let mut sum = [0.0; 4];
            for oy in 0..matrix.rows() {
                let ty = y as f64 + (oy as f64 - matrix.target_y() as f64) * unit_y;
                let ty = match fit(ty, region.y1(), region.y2()) {
                    Some(v) => v,
                    None => continue,
                };

                for ox in 0..matrix.columns() {
                    let tx = x as f64 + (ox as f64 - matrix.target_x() as f64) * unit_x;
                    let tx = match fit(tx, region.x1(), region.x2()) {
                        Some(v) => v,
                        None => continue,
                    };

                    let k = matrix.get(matrix.columns() - ox - 1,
                                       matrix.rows() - oy - 1);

                    let p = src.pixel_at(tx, ty);
                    sum[0] += p.r as f64 * k;
                    sum[1] += p.g as f64 * k;
                    sum[2] += p.b as f64 * k;
                    sum[3] += p.a as f64 * k;
                }
            }

            let calc = |s: f64| round_channel(s / divisor + bias);

            let in_a = src.pixel_at(x, y).a;
            let out = dest.pixel_at_mut(x, y);
            out.r = calc(sum[0]);
            out.g = calc(sum[1]);
            out.b = calc(sum[2]);
            out.a = if preserve_alpha { in_a } else { calc(sum[3]) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RGBA8;

    fn run(matrix: ConvolveMatrix, edge_mode: EdgeMode, src: &[RGBA8], w: u32, h: u32) -> Vec<RGBA8> {
        let mut dest = vec![RGBA8::default(); src.len()];
        convolve_matrix(
            matrix, 1.0, 0.0, (1.0, 1.0), edge_mode, false,
            ImageRef::new(src, w, h),
            Region::from_size(w, h),
            ImageRefMut::new(&mut dest, w, h),
        );
        dest
    }

    fn ramp() -> Vec<RGBA8> {
        (0..3).map(|i| RGBA8::new(i * 10, 0, 0, 255)).collect()
    }

    #[test]
    fn matrix_validation() {
        let data = [1.0; 9];
        assert!(ConvolveMatrix::new(1, 1, 3, 3, &data).is_some());
        assert!(ConvolveMatrix::new(3, 1, 3, 3, &data).is_none());
        assert!(ConvolveMatrix::new(1, 1, 3, 2, &data).is_none());
    }

    #[test]
    fn identity_kernel() {
        let data = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let m = ConvolveMatrix::new(1, 1, 3, 3, &data).unwrap();
        let src = ramp();
        assert_eq!(run(m, EdgeMode::None, &src, 3, 1), src);
    }

    #[test]
    fn kernel_is_rotated() {
        // Picks the left neighbour once rotated.
        let data = [0.0, 0.0, 1.0];
        let m = ConvolveMatrix::new(1, 0, 3, 1, &data).unwrap();
        let dest = run(m, EdgeMode::Duplicate, &ramp(), 3, 1);
        let r: Vec<u8> = dest.iter().map(|p| p.r).collect();
        assert_eq!(r, vec![0, 0, 10]);
    }

    #[test]
    fn edge_modes() {
        let data = [0.0, 0.0, 1.0];
        let src = ramp();

        let m = ConvolveMatrix::new(1, 0, 3, 1, &data).unwrap();
        let dest = run(m.clone(), EdgeMode::Wrap, &src, 3, 1);
        assert_eq!(dest[0].r, 20);

        let dest = run(m, EdgeMode::None, &src, 3, 1);
        assert_eq!(dest[0], RGBA8::default());
        assert_eq!(dest[1].r, 0);
        assert_eq!(dest[1].a, 255);
    }

    #[test]
    fn bias_and_preserve_alpha() {
        let data = [1.0];
        let m = ConvolveMatrix::new(0, 0, 1, 1, &data).unwrap();
        let src = [RGBA8::new(10, 20, 30, 100)];
        let mut dest = [RGBA8::default()];
        convolve_matrix(
            m, 2.0, 5.0, (1.0, 1.0), EdgeMode::Duplicate, true,
            ImageRef::new(&src, 1, 1),
            Region::from_size(1, 1),
            ImageRefMut::new(&mut dest, 1, 1),
        );
        assert_eq!(dest[0], RGBA8::new(10, 15, 20, 100));
    }

    #[test]
    fn wrap_with_huge_unit() {
        let data = [1.0, 1.0, 1.0];
        let m = ConvolveMatrix::new(1, 0, 3, 1, &data).unwrap();
        let src = vec![RGBA8::new(10, 20, 30, 40); 16];
        let mut dest = vec![RGBA8::default(); 16];
        convolve_matrix(
            m, 3.0, 0.0, (1e12, 1e12), EdgeMode::Wrap, false,
            ImageRef::new(&src, 4, 4),
            Region::new(1, 1, 4, 4),
            ImageRefMut::new(&mut dest, 4, 4),
        );

        assert_eq!(dest[0], RGBA8::default());
        assert!(dest[5..8].iter().all(|p| *p == RGBA8::new(10, 20, 30, 40)));
    }

    #[test]
    fn non_finite_unit() {
        let data = [1.0, 1.0, 1.0];
        let src = vec![RGBA8::new(10, 20, 30, 40); 4];
        for &unit in &[f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            for &mode in &[EdgeMode::Wrap, EdgeMode::Duplicate, EdgeMode::None] {
                let m = ConvolveMatrix::new(1, 0, 3, 1, &data).unwrap();
                let mut dest = vec![RGBA8::default(); 4];
                convolve_matrix(
                    m, 1.0, 0.0, (unit, 1.0), mode, false,
                    ImageRef::new(&src, 4, 1),
                    Region::new(1, 0, 4, 1),
                    ImageRefMut::new(&mut dest, 4, 1),
                );
                assert_eq!(dest[0], RGBA8::default());
            }
        }
    }

    #[test]
    fn empty_matrix() {
        let src = ramp();
        let dest = run(ConvolveMatrix::empty(), EdgeMode::Duplicate, &src, 3, 1);
        assert!(dest.iter().all(|p| *p == RGBA8::default()));
    }
}
