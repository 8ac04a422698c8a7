// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use core::cmp;

use crate::{ImageRef, ImageRefMut, Region, round_channel};

/// A transfer function used `component_transfer`.
///
/// <https://www.w3.org/TR/SVG11/filters.html#transferFuncElements>
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug)]
pub enum TransferFunction<'a> {
    /// Keeps component as is.
    Identity,

    /// Applies a linear interpolation to a component.
    ///
    /// An empty list acts as `Identity`.
    Table(&'a [f64]),

    /// Applies a step function to a component.
    ///
    /// An empty list acts as `Identity`.
    Discrete(&'a [f64]),

    /// Applies a linear shift to a component.
    Linear {
        slope: f64,
        intercept: f64,
    },

    /// Applies an exponential shift to a component.
    Gamma {
        amplitude: f64,
        exponent: f64,
        offset: f64,
    },
}

impl Default for TransferFunction<'_> {
    fn default() -> Self {
        TransferFunction::Identity
    }
}

impl TransferFunction<'_> {
    /// Maps a normalized component.
    ///
    /// The result is not clamped.
    pub fn apply(&self, c: f64) -> f64 {
        match *self {
            TransferFunction::Identity => {
                c
            }
            TransferFunction::Table(values) => {
                if values.is_empty() {
                    return c;
                }

                let n = values.len();
                let k = table_index(c, n);
                if k == n - 1 {
                    // The last segment is never interpolated.
                    values[k.saturating_sub(1)]
                } else {
                    let vk = values[k];
                    let vk1 = values[k + 1];
                    let n = n as f64;
                    let distance = (c - (k as f64 + 1.0) / n) * n;
                    vk + distance * (vk1 - vk)
                }
            }
            TransferFunction::Discrete(values) => {
                if values.is_empty() {
                    return c;
                }

                values[table_index(c, values.len())]
            }
            TransferFunction::Linear { slope, intercept } => {
                slope * c + intercept
            }
            TransferFunction::Gamma { amplitude, exponent, offset } => {
                amplitude * c.powf(exponent) + offset
            }
        }
    }

    #[inline]
    fn apply_channel(&self, c: u8) -> u8 {
        round_channel(self.apply(c as f64 / 255.0) * 255.0)
    }
}

/// Returns `max(floor(c·n) - 1, 0)`, limited to the last index.
#[inline]
fn table_index(c: f64, n: usize) -> usize {
    let k = (c * n as f64).floor() as i64 - 1;
    cmp::min(cmp::max(k, 0) as usize, n - 1)
}

/// Applies component transfer functions for each `src` image channel.
///
/// # Panics
///
/// When `src` and `dest` have different sizes.
pub fn component_transfer(
    func_r: TransferFunction,
    func_g: TransferFunction,
    func_b: TransferFunction,
    func_a: TransferFunction,
    src: ImageRef,
    region: Region,
    mut dest: ImageRefMut,
) {
    assert!(src.same_size(&dest));

    let region = region.fit_to(dest.width, dest.height);
    for y in region.rows() {
        for x in region.columns() {
            let p = src.pixel_at(x, y);
            let out = dest.pixel_at_mut(x, y);
            out.r = func_r.apply_channel(p.r);
            out.g = func_g.apply_channel(p.g);
            out.b = func_b.apply_channel(p.b);
            out.a = func_a.apply_channel(p.a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_roundtrip() {
        for c in 0..=255u8 {
            assert_eq!(TransferFunction::Identity.apply_channel(c), c);
        }
    }

    #[test]
    fn empty_table_is_identity() {
        for c in 0..=255u8 {
            assert_eq!(TransferFunction::Table(&[]).apply_channel(c), c);
            assert_eq!(TransferFunction::Discrete(&[]).apply_channel(c), c);
        }
    }

    #[test]
    fn table_last_segment_quirk() {
        // `k` lands on the last index, so the second-to-last value is returned.
        let f = TransferFunction::Table(&[0.0, 0.5, 1.0]);
        assert_eq!(f.apply(1.0), 0.5);
    }

    #[test]
    fn table_interpolates() {
        let f = TransferFunction::Table(&[0.0, 0.5, 1.0]);
        // k = floor(0.5 * 3) - 1 = 0, distance = (0.5 - 1/3) * 3 = 0.5
        assert!((f.apply(0.5) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn table_single_value() {
        let f = TransferFunction::Table(&[0.3]);
        assert_eq!(f.apply(0.9), 0.3);
    }

    #[test]
    fn discrete_steps() {
        let f = TransferFunction::Discrete(&[0.1, 0.6, 0.9]);
        assert_eq!(f.apply(0.0), 0.1);
        assert_eq!(f.apply(0.5), 0.1);
        assert_eq!(f.apply(0.7), 0.6);
        assert_eq!(f.apply(1.0), 0.9);
    }

    #[test]
    fn linear() {
        let f = TransferFunction::Linear { slope: 0.5, intercept: 0.25 };
        assert_eq!(f.apply_channel(255), 191);
        assert_eq!(f.apply_channel(0), 64);
    }

    #[test]
    fn gamma() {
        let f = TransferFunction::Gamma { amplitude: 1.0, exponent: 2.0, offset: 0.0 };
        assert_eq!(f.apply_channel(255), 255);
        assert_eq!(f.apply_channel(0), 0);
    }

    #[test]
    fn clamps_output() {
        let f = TransferFunction::Linear { slope: 4.0, intercept: -1.0 };
        assert_eq!(f.apply_channel(0), 0);
        assert_eq!(f.apply_channel(255), 255);
    }

    #[test]
    fn per_channel() {
        let src = [crate::RGBA8::new(10, 20, 30, 40)];
        let mut dest = [crate::RGBA8::default()];
        component_transfer(
            TransferFunction::Linear { slope: 0.0, intercept: 1.0 },
            TransferFunction::Identity,
            TransferFunction::Linear { slope: 0.0, intercept: 0.0 },
            TransferFunction::Identity,
            ImageRef::new(&src, 1, 1),
            Region::from_size(1, 1),
            ImageRefMut::new(&mut dest, 1, 1),
        );
        assert_eq!(dest[0], crate::RGBA8::new(255, 20, 0, 40));
    }
}
