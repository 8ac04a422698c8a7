// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{ImageRef, ImageRefMut, Region, RGBA8, FuzzyZero, round_channel};

/// A blending mode used by `blend`.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Darken,
    Lighten,
}

impl Default for BlendMode {
    fn default() -> Self {
        BlendMode::Normal
    }
}

/// Blends `src1` (the `in` input) over `src2` (the `in2` input).
///
/// Only pixels inside the `region` are written.
///
/// # Panics
///
/// When `src1`, `src2` and `dest` have different sizes.
pub fn blend(
    mode: BlendMode,
    src1: ImageRef,
    src2: ImageRef,
    region: Region,
    mut dest: ImageRefMut,
) {
    assert!(src1.same_size(&dest) && src2.same_size(&dest));

    let region = region.fit_to(dest.width, dest.height);
    for y in region.rows() {
        for x in region.columns() {
            let p1 = src1.pixel_at(x, y);
            let p2 = src2.pixel_at(x, y);
            *dest.pixel_at_mut(x, y) = blend_pixel(mode, p1, p2);
        }
    }
}

fn blend_pixel(mode: BlendMode, p1: RGBA8, p2: RGBA8) -> RGBA8 {
    let qa = p1.a as f64 / 255.0;
    let qb = p2.a as f64 / 255.0;
    let qr = 1.0 - (1.0 - qa) * (1.0 - qb);

    let calc = |c1: u8, c2: u8| {
        if qr.is_fuzzy_zero() {
            return 0;
        }

        let ca = c1 as f64 / 255.0 * qa;
        let cb = c2 as f64 / 255.0 * qb;
        let cr = match mode {
            BlendMode::Normal => (1.0 - qa) * cb + ca,
            BlendMode::Multiply => (1.0 - qa) * cb + (1.0 - qb) * ca + ca * cb,
            BlendMode::Screen => ca + cb - ca * cb,
            BlendMode::Darken => ((1.0 - qa) * cb + ca).min((1.0 - qb) * ca + cb),
            BlendMode::Lighten => ((1.0 - qa) * cb + ca).max((1.0 - qb) * ca + cb),
        };

        round_channel(cr * 255.0 / qr)
    };

    RGBA8 {
        r: calc(p1.r, p2.r),
        g: calc(p1.g, p2.g),
        b: calc(p1.b, p2.b),
        a: round_channel(qr * 255.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: RGBA8 = RGBA8 { r: 255, g: 255, b: 255, a: 255 };
    const BLACK: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 255 };
    const CLEAR: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 0 };

    macro_rules! test {
        ($name:ident, $mode:expr, $p1:expr, $p2:expr, $result:expr) => {
            #[test]
            fn $name() {
                assert_eq!(blend_pixel($mode, $p1, $p2), $result);
            }
        };
    }

    test!(multiply_white_black, BlendMode::Multiply, WHITE, BLACK, BLACK);
    test!(screen_white_black, BlendMode::Screen, WHITE, BLACK, WHITE);
    test!(normal_opaque_top, BlendMode::Normal, BLACK, WHITE, BLACK);
    test!(darken_white_black, BlendMode::Darken, WHITE, BLACK, BLACK);
    test!(lighten_white_black, BlendMode::Lighten, WHITE, BLACK, WHITE);
    test!(normal_transparent_top, BlendMode::Normal, CLEAR, WHITE, WHITE);
    test!(both_transparent, BlendMode::Screen, CLEAR, CLEAR, CLEAR);

    #[test]
    fn writes_only_region() {
        let src1 = vec![WHITE; 4];
        let src2 = vec![BLACK; 4];
        let mut dest = vec![CLEAR; 4];
        blend(
            BlendMode::Multiply,
            ImageRef::new(&src1, 2, 2),
            ImageRef::new(&src2, 2, 2),
            Region::new(1, 0, 2, 1),
            ImageRefMut::new(&mut dest, 2, 2),
        );
        assert_eq!(dest, vec![CLEAR, BLACK, CLEAR, CLEAR]);
    }
}
