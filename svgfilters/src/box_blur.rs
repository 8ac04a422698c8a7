// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{ImageRef, ImageRefMut, Region, RGBA8};

const STEPS: usize = 3;

/// Returns a box window size that approximates a Gaussian with the provided deviation
/// after three passes.
///
/// `floor(sigma * 3 * sqrt(2 * PI) / 4 + 0.5)`
pub fn box_blur_size(sigma: f64) -> u32 {
    if !(sigma > 0.0) {
        return 0;
    }

    let k = (sigma * 3.0 * (2.0 * core::f64::consts::PI).sqrt() / 4.0 + 0.5).floor();
    if k > u32::MAX as f64 { u32::MAX } else { k as u32 }
}

/// Applies a box blur.
///
/// Runs three horizontal and vertical box passes, each restricted to the `region`.
/// Near the region edges the window is cut and the mean is taken over the remaining samples.
///
/// A window smaller than 2 disables the blur along that axis.
///
/// # Allocations
///
/// This method will allocate a copy of the `src` image as a back buffer.
///
/// # Panics
///
/// When `src` and `dest` have different sizes.
pub fn box_blur(
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

    let kx = box_blur_size(sigma_x) as usize;
    let ky = box_blur_size(sigma_y) as usize;

    let mut buf = src.data.to_vec();
    let mut buf = ImageRefMut::new(&mut buf, src.width, src.height);
    let mut line_in = Vec::new();
    let mut line_out = Vec::new();

    for _ in 0..STEPS {
        if kx >= 2 {
            for y in region.rows() {
                line_in.clear();
                line_in.extend(region.columns().map(|x| buf.pixel_at(x, y)));
                line_out.resize(line_in.len(), RGBA8::default());
                box_blur_line(&line_in, kx, &mut line_out);
                for (x, p) in region.columns().zip(line_out.iter()) {
                    *buf.pixel_at_mut(x, y) = *p;
                }
            }
        }

        if ky >= 2 {
            for x in region.columns() {
                line_in.clear();
                line_in.extend(region.rows().map(|y| buf.pixel_at(x, y)));
                line_out.resize(line_in.len(), RGBA8::default());
                box_blur_line(&line_in, ky, &mut line_out);
                for (y, p) in region.rows().zip(line_out.iter()) {
                    *buf.pixel_at_mut(x, y) = *p;
                }
            }
        }
    }

    for y in region.rows() {
        for x in region.columns() {
            *dest.pixel_at_mut(x, y) = buf.pixel_at(x, y);
        }
    }
}

/// Blurs a single row or column with a `k`-wide moving window.
///
/// Output `q` is the rounded integer mean of `src[q + k/2 + 1 - k ..= q + k/2]`,
/// limited to the line.
fn box_blur_line(src: &[RGBA8], k: usize, dest: &mut [RGBA8]) {
    debug_assert_eq!(src.len(), dest.len());

    let len = src.len();
    let half = k / 2;
    let mut sum = [0u32; 4];
    let mut count = 0u32;

    for x in 0..len + half {
        if x < len {
            let p = src[x];
            sum[0] += p.r as u32;
            sum[1] += p.g as u32;
            sum[2] += p.b as u32;
            sum[3] += p.a as u32;
            count += 1;
        }

        if x >= k {
            let p = src[x - k];
            sum[0] -= p.r as u32;
            sum[1] -= p.g as u32;
            sum[2] -= p.b as u32;
            sum[3] -= p.a as u32;
            count -= 1;
        }

        if x >= half {
            let mean = |s: u32| ((s + count / 2) / count) as u8;
            dest[x - half] = RGBA8 {
                r: mean(sum[0]),
                g: mean(sum[1]),
                b: mean(sum[2]),
                a: mean(sum[3]),
            };
        }
    }
}
