// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{ImageRef, ImageRefMut, Region, round_channel};

/// A color matrix used by `color_matrix`.
#[derive(Clone, Copy, Debug)]
#[allow(missing_docs)]
pub enum ColorMatrix<'a> {
    /// A row-major 4×5 matrix.
    Matrix(&'a [f64; 20]),
    /// Saturation, usually in a `0..1` range.
    Saturate(f64),
    /// Hue rotation angle, in radians.
    HueRotate(f64),
    LuminanceToAlpha,
}

impl ColorMatrix<'_> {
    /// Expands the matrix into a row-major 4×5 form.
    pub fn to_matrix(&self) -> [f64; 20] {
        let mut m = [0.0; 20];
        match *self {
            ColorMatrix::Matrix(values) => {
                m = *values;
            }
            ColorMatrix::Saturate(s) => {
                m[0]  = 0.213 + 0.787 * s;
                m[1]  = 0.715 - 0.715 * s;
                m[2]  = 0.072 - 0.072 * s;
                m[5]  = 0.213 - 0.213 * s;
                m[6]  = 0.715 + 0.285 * s;
                m[7]  = 0.072 - 0.072 * s;
                m[10] = 0.213 - 0.213 * s;
                m[11] = 0.715 - 0.715 * s;
                m[12] = 0.072 + 0.928 * s;
                m[18] = 1.0;
            }
            ColorMatrix::HueRotate(angle) => {
                let a1 = angle.cos();
                let a2 = angle.sin();
                m[0]  = 0.213 + 0.787 * a1 - 0.213 * a2;
                m[1]  = 0.715 - 0.715 * a1 - 0.715 * a2;
                m[2]  = 0.072 - 0.072 * a1 + 0.928 * a2;
                m[5]  = 0.213 - 0.213 * a1 + 0.143 * a2;
                m[6]  = 0.715 + 0.285 * a1 + 0.140 * a2;
                m[7]  = 0.072 - 0.072 * a1 - 0.283 * a2;
                m[10] = 0.213 - 0.213 * a1 - 0.787 * a2;
                m[11] = 0.715 - 0.715 * a1 + 0.715 * a2;
                m[12] = 0.072 + 0.928 * a1 + 0.072 * a2;
                m[18] = 1.0;
            }
            ColorMatrix::LuminanceToAlpha => {
                m[15] = 0.2125;
                m[16] = 0.7154;
                m[17] = 0.0721;
            }
        }

        m
    }
}

/// Applies a color matrix filter.
///
/// Each output channel is `M[ch][0]·R + M[ch][1]·G + M[ch][2]·B + M[ch][3]·A + M[ch][4]`,
/// computed on raw 8-bit samples and clamped to `0..=255`.
///
/// # Panics
///
/// When `src` and `dest` have different sizes.
pub fn color_matrix(
    matrix: ColorMatrix,
    src: ImageRef,
    region: Region,
    mut dest: ImageRefMut,
) {
    assert!(src.same_size(&dest));

    let m = matrix.to_matrix();
    let region = region.fit_to(dest.width, dest.height);
    for y in region.rows() {
        for x in region.columns() {
            let p = src.pixel_at(x, y);
            let (r, g, b, a) = (p.r as f64, p.g as f64, p.b as f64, p.a as f64);
            let row = |i: usize| r * m[i] + g * m[i + 1] + b * m[i + 2] + a * m[i + 3] + m[i + 4];

            let out = dest.pixel_at_mut(x, y);
            out.r = round_channel(row(0));
            out.g = round_channel(row(5));
            out.b = round_channel(row(10));
            out.a = round_channel(row(15));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RGBA8;

    fn apply(matrix: ColorMatrix, p: RGBA8) -> RGBA8 {
        let src = [p];
        let mut dest = [RGBA8::default()];
        color_matrix(matrix, ImageRef::new(&src, 1, 1), Region::from_size(1, 1),
                     ImageRefMut::new(&mut dest, 1, 1));
        dest[0]
    }

    #[test]
    fn luminance_to_alpha_red() {
        let p = apply(ColorMatrix::LuminanceToAlpha, RGBA8::new(255, 0, 0, 255));
        assert_eq!(p, RGBA8::new(0, 0, 0, 54));
    }

    #[test]
    fn saturate_one_is_identity() {
        let p = RGBA8::new(12, 130, 240, 200);
        assert_eq!(apply(ColorMatrix::Saturate(1.0), p), p);
    }

    #[test]
    fn saturate_zero_is_gray() {
        let p = apply(ColorMatrix::Saturate(0.0), RGBA8::new(255, 255, 255, 255));
        assert_eq!(p, RGBA8::new(255, 255, 255, 255));
    }

    #[test]
    fn hue_rotate_zero_is_identity() {
        let p = RGBA8::new(12, 130, 240, 200);
        assert_eq!(apply(ColorMatrix::HueRotate(0.0), p), p);
    }

    #[test]
    fn hue_rotate_in_radians() {
        let red = RGBA8::new(255, 0, 0, 255);
        let p = apply(ColorMatrix::HueRotate(core::f64::consts::PI), red);
        assert_eq!(p, RGBA8::new(0, 109, 109, 255));

        let p = apply(ColorMatrix::HueRotate(180.0), red);
        assert_eq!(p, RGBA8::new(0, 58, 248, 255));
    }

    #[test]
    fn zero_matrix_clears() {
        let m = [0.0; 20];
        let p = apply(ColorMatrix::Matrix(&m), RGBA8::new(12, 130, 240, 200));
        assert_eq!(p, RGBA8::default());
    }

    #[test]
    fn offset_column_is_raw() {
        let mut m = [0.0; 20];
        m[4] = 10.0;
        m[18] = 1.0;
        let p = apply(ColorMatrix::Matrix(&m), RGBA8::new(0, 0, 0, 255));
        assert_eq!(p, RGBA8::new(10, 0, 0, 255));
    }
}
