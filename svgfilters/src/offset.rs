// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{ImageRef, ImageRefMut, Region};

/// Shifts the image by (`dx`, `dy`) pixels.
///
/// Each pixel inside the `region` is taken from (`x - dx`, `y - dy`) when that position
/// lies inside the `region` too. Otherwise it is left untouched.
///
/// # Panics
///
/// When `src` and `dest` have different sizes.
pub fn offset(
    dx: i32,
    dy: i32,
    src: ImageRef,
    region: Region,
    mut dest: ImageRefMut,
) {
    assert!(src.same_size(&dest));

    let region = region.fit_to(dest.width, dest.height);
    for y in region.rows() {
        for x in region.columns() {
            let sx = match (x as i32).checked_sub(dx) {
                Some(v) => v,
                None => continue,
            };
            let sy = match (y as i32).checked_sub(dy) {
                Some(v) => v,
                None => continue,
            };

            if region.contains(sx, sy) {
                *dest.pixel_at_mut(x, y) = src.pixel_at(sx as u32, sy as u32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RGBA8;

    fn single_pixel(dx: i32, dy: i32, region: Region) -> Vec<RGBA8> {
        let mut src = vec![RGBA8::default(); 16];
        src[0] = RGBA8::new(255, 255, 255, 255);
        let mut dest = vec![RGBA8::default(); 16];
        offset(dx, dy, ImageRef::new(&src, 4, 4), region, ImageRefMut::new(&mut dest, 4, 4));
        dest
    }

    #[test]
    fn shift_right() {
        let dest = single_pixel(2, 0, Region::from_size(4, 4));
        for (i, p) in dest.iter().enumerate() {
            if i == 2 {
                assert_eq!(p.a, 255);
            } else {
                assert_eq!(p.a, 0);
            }
        }
    }

    #[test]
    fn shift_left_drops_pixel() {
        let dest = single_pixel(-1, 0, Region::from_size(4, 4));
        assert!(dest.iter().all(|p| p.a == 0));
    }

    #[test]
    fn source_outside_region() {
        let dest = single_pixel(1, 1, Region::new(1, 1, 4, 4));
        assert!(dest.iter().all(|p| p.a == 0));
    }

    #[test]
    fn extreme_shift() {
        for &(dx, dy) in &[(i32::MIN, 0), (0, i32::MIN), (i32::MAX, 0), (0, i32::MAX), (i32::MIN, i32::MAX)] {
            let dest = single_pixel(dx, dy, Region::from_size(4, 4));
            assert!(dest.iter().all(|p| p.a == 0));
        }
    }
}
