// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use core::cmp;

use crate::{ImageRef, ImageRefMut, Region, RGBA8};

/// A morphology operation.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum MorphologyOperator {
    Erode,
    Dilate,
}

impl Default for MorphologyOperator {
    fn default() -> Self {
        MorphologyOperator::Erode
    }
}

/// Applies a morphology filter.
///
/// Each channel is replaced with its minimum (erode) or maximum (dilate)
/// over a `(2rx + 1)×(2ry + 1)` window. Window positions outside the image are skipped.
///
/// # Panics
///
/// When `src` and `dest` have different sizes.
pub fn morphology(
    operator: MorphologyOperator,
    rx: u32,
    ry: u32,
    src: ImageRef,
    region: Region,
    mut dest: ImageRefMut,
) {
    assert!(src.same_size(&dest));

    let region = region.fit_to(dest.width, dest.height);

    // No point in making the window larger than the image.
    let rx = cmp::min(rx, src.width) as i32;
    let ry = cmp::min(ry, src.height) as i32;
    let width_max = src.width as i32 - 1;
    let height_max = src.height as i32 - 1;

    for y in region.rows() {
        for x in region.columns() {
            let mut new_p = match operator {
                MorphologyOperator::Erode => RGBA8::new(255, 255, 255, 255),
                MorphologyOperator::Dilate => RGBA8::default(),
            };

            for oy in -ry..=ry {
                let ty = y as i32 + oy;
                if ty < 0 || ty > height_max {
                    continue;
                }

                for ox in -rx..=rx {
                    let tx = x as i32 + ox;
                    if tx < 0 || tx > width_max {
                        continue;
                    }

                    let p = src.pixel_at(tx as u32, ty as u32);
                    if operator == MorphologyOperator::Erode {
                        new_p.r = cmp::min(p.r, new_p.r);
                        new_p.g = cmp::min(p.g, new_p.g);
                        new_p.b = cmp::min(p.b, new_p.b);
                        new_p.a = cmp::min(p.a, new_p.a);
                    } else {
                        new_p.r = cmp::max(p.r, new_p.r);
                        new_p.g = cmp::max(p.g, new_p.g);
                        new_p.b = cmp::max(p.b, new_p.b);
                        new_p.a = cmp::max(p.a, new_p.a);
                    }
                }
            }

            *dest.pixel_at_mut(x, y) = new_p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Vec<RGBA8> {
        (0..25u8).map(|i| RGBA8::new(i * 10, 250 - i * 10, i, 255 - i)).collect()
    }

    fn run(op: MorphologyOperator, r: u32, src: &[RGBA8]) -> Vec<RGBA8> {
        let mut dest = vec![RGBA8::default(); src.len()];
        morphology(op, r, r, ImageRef::new(src, 5, 5), Region::from_size(5, 5),
                   ImageRefMut::new(&mut dest, 5, 5));
        dest
    }

    #[test]
    fn zero_radius_is_identity() {
        let src = image();
        assert_eq!(run(MorphologyOperator::Erode, 0, &src), src);
        assert_eq!(run(MorphologyOperator::Dilate, 0, &src), src);
    }

    #[test]
    fn monotonic() {
        let src = image();
        let d1 = run(MorphologyOperator::Dilate, 1, &src);
        let d2 = run(MorphologyOperator::Dilate, 2, &src);
        let e1 = run(MorphologyOperator::Erode, 1, &src);
        let e2 = run(MorphologyOperator::Erode, 2, &src);
        for i in 0..src.len() {
            assert!(d2[i].r >= d1[i].r && d1[i].r >= src[i].r);
            assert!(e2[i].r <= e1[i].r && e1[i].r <= src[i].r);
        }
    }

    #[test]
    fn dilate_spreads() {
        let mut src = vec![RGBA8::default(); 25];
        src[12] = RGBA8::new(255, 0, 0, 255);
        let dest = run(MorphologyOperator::Dilate, 1, &src);
        assert_eq!(dest[6], RGBA8::new(255, 0, 0, 255));
        assert_eq!(dest[0], RGBA8::default());
    }

    #[test]
    fn erode_skips_outside() {
        // Corners are not eroded by the transparent outside.
        let src = vec![RGBA8::new(9, 9, 9, 9); 25];
        let dest = run(MorphologyOperator::Erode, 2, &src);
        assert_eq!(dest, src);
    }
}
