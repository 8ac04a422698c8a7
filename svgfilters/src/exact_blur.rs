// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{ImageRef, ImageRefMut, Region, round_channel};

/// Kernel values below this threshold are dropped.
const THRESHOLD: f64 = 0.0001;

/// Applies a Gaussian blur using a full, non-separated kernel.
///
/// Samples outside the `region` are clamped to its edges.
/// A negative or zero `sigma_x`/`sigma_y` will disable the blur along that axis.
///
/// Precise, but slow. Intended for small deviations:
/// once the normalized Gaussian peak drops below the threshold, the axis is left unblurred.
///
/// # Allocations
///
/// This method will allocate a kernel buffer.
///
/// # Panics
///
/// When `src` and `dest` have different sizes.
pub fn exact_blur(
    sigma_x: f64,
    sigma_y: f64,
    src: ImageRef,
    region: Region,
    mut dest: ImageRefMut,
) {
    assert!(src.same_size(&dest));

    let region = region.fit_to(dest.width, dest.height);
    if region.is_empty() {
        return;
    }

    let kx = kernel(sigma_x);
    let ky = kernel(sigma_y);
    let rx = (kx.len() / 2) as i32;
    let ry = (ky.len() / 2) as i32;

    let mut matrix = Vec::with_capacity(kx.len() * ky.len());
    for gy in &ky {
        for gx in &kx {
            matrix.push(gx * gy);
        }
    }
    let total: f64 = matrix.iter().sum();

    let clamp = |v: i32, min: i32, max: i32| core::cmp::max(min, core::cmp::min(max - 1, v));

    for y in region.rows() {
        for x in region.columns() {
            let mut sum = [0.0; 4];
            let mut values = matrix.iter();
            for oy in -ry..=ry {
                let sy = clamp(y as i32 + oy, region.y1(), region.y2()) as u32;
                for ox in -rx..=rx {
                    let sx = clamp(x as i32 + ox, region.x1(), region.x2()) as u32;
                    let k = values.next().copied().unwrap_or(0.0);
                    let p = src.pixel_at(sx, sy);
                    sum[0] += p.r as f64 * k;
                    sum[1] += p.g as f64 * k;
                    sum[2] += p.b as f64 * k;
                    sum[3] += p.a as f64 * k;
                }
            }

            let out = dest.pixel_at_mut(x, y);
            out.r = round_channel(sum[0] / total);
            out.g = round_channel(sum[1] / total);
            out.b = round_channel(sum[2] / total);
            out.a = round_channel(sum[3] / total);
        }
    }
}

/// Builds a symmetric 1D kernel with a unit centre tap.
///
/// Its half-width is the last distance at which the normalized Gaussian stays above `THRESHOLD`.
/// A deviation too small to be represented gives a single tap.
fn kernel(sigma: f64) -> Vec<f64> {
    let d = 2.0 * sigma * sigma;
    if !(sigma > 0.0) || !(d > 0.0) || !d.is_finite() {
        return vec![1.0];
    }

    let norm = (core::f64::consts::PI * d).sqrt();
    let tap = |i: f64| (-(i * i) / d).exp();

    let mut radius = 0;
    while tap((radius + 1) as f64) / norm >= THRESHOLD {
        radius += 1;
    }

    let radius = radius as i32;
    (-radius..=radius).map(|i| tap(i as f64)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RGBA8;

    #[test]
    fn kernel_size() {
        assert_eq!(kernel(0.0).len(), 1);
        assert_eq!(kernel(-1.0).len(), 1);
        // g(8) for sigma 2 is ~6.7e-5, g(7) is ~4.4e-4.
        assert_eq!(kernel(2.0).len(), 15);
        assert_eq!(kernel(2.0)[7], 1.0);
    }

    #[test]
    fn kernel_with_underflowing_deviation() {
        assert_eq!(kernel(1e-200), vec![1.0]);
        assert_eq!(kernel(f64::NAN), vec![1.0]);
        assert_eq!(kernel(f64::INFINITY), vec![1.0]);
        assert!(kernel(1e-160).iter().all(|k| k.is_finite()));
    }

    #[test]
    fn underflowing_deviation_keeps_image() {
        let src = vec![RGBA8::new(200, 200, 200, 255); 64];
        let mut dest = vec![RGBA8::default(); 64];
        exact_blur(1e-200, 1.0, ImageRef::new(&src, 8, 8), Region::from_size(8, 8),
                   ImageRefMut::new(&mut dest, 8, 8));
        assert_eq!(src, dest);
    }

    #[test]
    fn constant_stays_constant() {
        let src = vec![RGBA8::new(100, 150, 200, 255); 64];
        let mut dest = vec![RGBA8::default(); 64];
        exact_blur(1.5, 1.0, ImageRef::new(&src, 8, 8), Region::from_size(8, 8),
                   ImageRefMut::new(&mut dest, 8, 8));
        assert_eq!(src, dest);
    }

    #[test]
    fn spreads_symmetrically() {
        let mut src = vec![RGBA8::default(); 25];
        src[12] = RGBA8::new(255, 255, 255, 255);
        let mut dest = vec![RGBA8::default(); 25];
        exact_blur(1.0, 1.0, ImageRef::new(&src, 5, 5), Region::from_size(5, 5),
                   ImageRefMut::new(&mut dest, 5, 5));
        assert!(dest[12].a > dest[11].a);
        assert_eq!(dest[11], dest[13]);
        assert_eq!(dest[7], dest[17]);
        assert_eq!(dest[11], dest[7]);
    }

    #[test]
    fn single_axis() {
        let mut src = vec![RGBA8::default(); 9];
        src[4] = RGBA8::new(0, 0, 0, 255);
        let mut dest = vec![RGBA8::default(); 9];
        exact_blur(1.0, 0.0, ImageRef::new(&src, 3, 3), Region::from_size(3, 3),
                   ImageRefMut::new(&mut dest, 3, 3));
        assert_eq!(dest[1].a, 0);
        assert_eq!(dest[7].a, 0);
        assert!(dest[3].a > 0);
    }
}
