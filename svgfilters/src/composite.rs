// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{ImageRef, ImageRefMut, Region, RGBA8, FuzzyZero, f64_bound, round_channel};

/// A compositing operator used by `composite`.
///
/// `A` is the `in` input and `B` is the `in2` one.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum CompositeOperator {
    Over,
    In,
    Out,
    Atop,
    Xor,
    Arithmetic {
        k1: f64,
        k2: f64,
        k3: f64,
        k4: f64,
    },
}

impl Default for CompositeOperator {
    fn default() -> Self {
        CompositeOperator::Over
    }
}

impl CompositeOperator {
    /// Returns Porter-Duff `(Fa, Fb)` coefficients.
    ///
    /// `None` for `Arithmetic`.
    fn coefficients(&self, qa: f64, qb: f64) -> Option<(f64, f64)> {
        match *self {
            CompositeOperator::Over => Some((1.0, 1.0 - qa)),
            CompositeOperator::In => Some((qb, 0.0)),
            CompositeOperator::Out => Some((1.0 - qb, 0.0)),
            CompositeOperator::Atop => Some((qb, 1.0 - qa)),
            CompositeOperator::Xor => Some((1.0 - qb, 1.0 - qa)),
            CompositeOperator::Arithmetic { .. } => None,
        }
    }
}

/// Composites `src1` (the `in` input) with `src2` (the `in2` input).
///
/// Only pixels inside the `region` are written.
///
/// # Panics
///
/// When `src1`, `src2` and `dest` have different sizes.
pub fn composite(
    operator: CompositeOperator,
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
            *dest.pixel_at_mut(x, y) = composite_pixel(operator, p1, p2);
        }
    }
}

fn composite_pixel(operator: CompositeOperator, p1: RGBA8, p2: RGBA8) -> RGBA8 {
    if let CompositeOperator::Arithmetic { k1, k2, k3, k4 } = operator {
        let calc = |c1: u8, c2: u8| {
            let ca = c1 as f64 / 255.0;
            let cb = c2 as f64 / 255.0;
            let cr = k1 * ca * cb + k2 * ca + k3 * cb + k4;
            round_channel(f64_bound(0.0, cr, 1.0) * 255.0)
        };

        return RGBA8 {
            r: calc(p1.r, p2.r),
            g: calc(p1.g, p2.g),
            b: calc(p1.b, p2.b),
            a: calc(p1.a, p2.a),
        };
    }

    let qa = p1.a as f64 / 255.0;
    let qb = p2.a as f64 / 255.0;
    let (fa, fb) = operator.coefficients(qa, qb).unwrap_or((0.0, 0.0));
    let qr = fa * qa + fb * qb;

    let calc = |c1: u8, c2: u8| {
        if qr.is_fuzzy_zero() {
            return 0;
        }

        let ca = c1 as f64 / 255.0 * qa;
        let cb = c2 as f64 / 255.0 * qb;
        let cr = (ca * fa + cb * fb) / qr;
        round_channel(f64_bound(0.0, cr, 1.0) * 255.0)
    };

    RGBA8 {
        r: calc(p1.r, p2.r),
        g: calc(p1.g, p2.g),
        b: calc(p1.b, p2.b),
        a: round_channel(f64_bound(0.0, qr, 1.0) * 255.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: RGBA8 = RGBA8 { r: 255, g: 0, b: 0, a: 255 };
    const BLUE: RGBA8 = RGBA8 { r: 0, g: 0, b: 255, a: 255 };
    const CLEAR: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 0 };

    macro_rules! test {
        ($name:ident, $op:expr, $p1:expr, $p2:expr, $result:expr) => {
            #[test]
            fn $name() {
                assert_eq!(composite_pixel($op, $p1, $p2), $result);
            }
        };
    }

    test!(over_opaque, CompositeOperator::Over, RED, BLUE, RED);
    test!(over_transparent, CompositeOperator::Over, CLEAR, BLUE, BLUE);
    test!(in_opaque, CompositeOperator::In, RED, BLUE, RED);
    test!(in_transparent, CompositeOperator::In, RED, CLEAR, CLEAR);
    test!(out_opaque, CompositeOperator::Out, RED, BLUE, CLEAR);
    test!(out_transparent, CompositeOperator::Out, RED, CLEAR, RED);
    test!(atop_opaque, CompositeOperator::Atop, RED, BLUE, RED);
    test!(xor_opaque, CompositeOperator::Xor, RED, BLUE, CLEAR);
    test!(xor_one_side, CompositeOperator::Xor, CLEAR, BLUE, BLUE);

    test!(arithmetic_sum,
        CompositeOperator::Arithmetic { k1: 0.0, k2: 1.0, k3: 1.0, k4: 0.0 },
        RED, BLUE,
        RGBA8::new(255, 0, 255, 255)
    );

    test!(arithmetic_constant,
        CompositeOperator::Arithmetic { k1: 0.0, k2: 0.0, k3: 0.0, k4: 0.5 },
        RED, BLUE,
        RGBA8::new(128, 128, 128, 128)
    );

    #[test]
    fn over_keeps_opaque_input() {
        for v in 0..=255u8 {
            let p1 = RGBA8::new(v, 255 - v, v / 2, 255);
            let p2 = RGBA8::new(17, 200, 3, v);
            assert_eq!(composite_pixel(CompositeOperator::Over, p1, p2), p1);
        }
    }
}
