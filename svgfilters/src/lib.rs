// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgfilters` provides low-level raster operations behind
[SVG filter primitives](https://www.w3.org/TR/SVG11/filters.html).

`svgfilters` doesn't implement the whole filters workflow, just operations on raster images.
Filter region calculation, input resolution, named results, primitives order
and transformations should be implemented by the caller.

All operations work on **unpremultiplied** RGBA images. Every operation reads
from one or two canvas-sized sources and writes only the pixels inside the provided
[`Region`] of a canvas-sized destination. Pixels outside the region are left untouched,
so the destination is usually a freshly allocated, transparent buffer.

## Implemented operations

- [feBlend](https://www.w3.org/TR/SVG11/filters.html#feBlendElement)
  `normal`, `multiply`, `screen`, `darken` and `lighten` modes.
- [feColorMatrix](https://www.w3.org/TR/SVG11/filters.html#feColorMatrixElement)
- [feComponentTransfer](https://www.w3.org/TR/SVG11/filters.html#feComponentTransferElement)
- [feComposite](https://www.w3.org/TR/SVG11/filters.html#feCompositeElement)
  Porter-Duff operators and the arithmetic one.
- [feConvolveMatrix](https://www.w3.org/TR/SVG11/filters.html#feConvolveMatrixElement)
- [feGaussianBlur](https://www.w3.org/TR/SVG11/filters.html#feGaussianBlurElement)
  An exact kernel and a three-pass box blur variants are available.
- [feMorphology](https://www.w3.org/TR/SVG11/filters.html#feMorphologyElement)
- [feOffset](https://www.w3.org/TR/SVG11/filters.html#feOffsetElement)
- [feMerge](https://www.w3.org/TR/SVG11/filters.html#feMergeElement)
  via [`alpha_blit`].

## Performance

The library isn't well optimized yet, but it's mostly allocation free.
Some methods will allocate necessary, temporary buffers which will be reflected in the documentation.
But majority of methods will work on provided buffers.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

use float_cmp::ApproxEqUlps;
pub use rgb::RGBA8;

mod blend;
mod blit;
mod box_blur;
mod color_matrix;
mod component_transfer;
mod composite;
mod convolve_matrix;
mod exact_blur;
mod morphology;
mod offset;

pub use blend::{BlendMode, blend};
pub use blit::alpha_blit;
pub use box_blur::{box_blur, box_blur_size};
pub use color_matrix::{ColorMatrix, color_matrix};
pub use component_transfer::{TransferFunction, component_transfer};
pub use composite::{CompositeOperator, composite};
pub use convolve_matrix::{ConvolveMatrix, EdgeMode, convolve_matrix};
pub use exact_blur::exact_blur;
pub use morphology::{MorphologyOperator, morphology};
pub use offset::offset;


/// An image reference.
///
/// Image pixels should be stored in RGBA order with an **unpremultiplied** alpha.
#[derive(Clone, Copy)]
pub struct ImageRef<'a> {
    data: &'a [RGBA8],
    width: u32,
    height: u32,
}

impl<'a> ImageRef<'a> {
    /// Creates a new image reference.
    ///
    /// Doesn't clone the provided data.
    ///
    /// # Panics
    ///
    /// When `data.len()` != `width * height`.
    #[inline]
    pub fn new(data: &'a [RGBA8], width: u32, height: u32) -> Self {
        assert_eq!(data.len(), (width * height) as usize);
        ImageRef { data, width, height }
    }

    /// Returns the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel_at(&self, x: u32, y: u32) -> RGBA8 {
        self.data[(self.width * y + x) as usize]
    }

    #[inline]
    fn same_size(&self, other: &ImageRefMut) -> bool {
        self.width == other.width && self.height == other.height
    }
}


/// A mutable `ImageRef` variant.
pub struct ImageRefMut<'a> {
    data: &'a mut [RGBA8],
    width: u32,
    height: u32,
}

impl<'a> ImageRefMut<'a> {
    /// Creates a new mutable image reference.
    ///
    /// Doesn't clone the provided data.
    ///
    /// # Panics
    ///
    /// When `data.len()` != `width * height`.
    #[inline]
    pub fn new(data: &'a mut [RGBA8], width: u32, height: u32) -> Self {
        assert_eq!(data.len(), (width * height) as usize);
        ImageRefMut { data, width, height }
    }

    /// Returns the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel_at(&self, x: u32, y: u32) -> RGBA8 {
        self.data[(self.width * y + x) as usize]
    }

    #[inline]
    fn pixel_at_mut(&mut self, x: u32, y: u32) -> &mut RGBA8 {
        &mut self.data[(self.width * y + x) as usize]
    }
}


/// A half-open pixel rectangle `[x1, x2) × [y1, y2)`.
///
/// Used as a filter primitive bounds. Operations never write outside of it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Region {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Region {
    /// Creates a new region.
    ///
    /// When `x2 < x1` or `y2 < y1` an empty region is created.
    #[inline]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Region {
            x1,
            y1,
            x2: core::cmp::max(x1, x2),
            y2: core::cmp::max(y1, y2),
        }
    }

    /// Creates a region that covers a whole `width`×`height` image.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Region::new(0, 0, width as i32, height as i32)
    }

    /// Left edge, inclusive.
    #[inline]
    pub fn x1(&self) -> i32 {
        self.x1
    }

    /// Top edge, inclusive.
    #[inline]
    pub fn y1(&self) -> i32 {
        self.y1
    }

    /// Right edge, exclusive.
    #[inline]
    pub fn x2(&self) -> i32 {
        self.x2
    }

    /// Bottom edge, exclusive.
    #[inline]
    pub fn y2(&self) -> i32 {
        self.y2
    }

    /// Returns the region width.
    #[inline]
    pub fn width(&self) -> u32 {
        (self.x2 - self.x1) as u32
    }

    /// Returns the region height.
    #[inline]
    pub fn height(&self) -> u32 {
        (self.y2 - self.y1) as u32
    }

    /// Checks that region has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x1 == self.x2 || self.y1 == self.y2
    }

    /// Checks that a pixel lies inside the region.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Clips the region to a `width`×`height` image.
    #[inline]
    pub fn fit_to(&self, width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;
        Region::new(
            bound(0, self.x1, w),
            bound(0, self.y1, h),
            bound(0, self.x2, w),
            bound(0, self.y2, h),
        )
    }

    #[inline]
    fn rows(&self) -> core::ops::Range<u32> {
        self.y1 as u32..self.y2 as u32
    }

    #[inline]
    fn columns(&self) -> core::ops::Range<u32> {
        self.x1 as u32..self.x2 as u32
    }
}


/// Builds an image from the `src` alpha channel.
///
/// RGB channels of the result are zeroed. Alpha is copied as is.
pub fn alpha_mask(src: &[RGBA8]) -> Vec<RGBA8> {
    src.iter().map(|p| RGBA8::new(0, 0, 0, p.a)).collect()
}

/// Multiplies provided pixels alpha.
pub fn multiply_alpha(data: &mut [RGBA8]) {
    for p in data {
        let a = p.a as f64 / 255.0;
        p.b = (p.b as f64 * a + 0.5) as u8;
        p.g = (p.g as f64 * a + 0.5) as u8;
        p.r = (p.r as f64 * a + 0.5) as u8;
    }
}

/// Demultiplies provided pixels alpha.
pub fn demultiply_alpha(data: &mut [RGBA8]) {
    for p in data {
        if p.a == 0 {
            p.r = 0;
            p.g = 0;
            p.b = 0;
            continue;
        }

        let a = p.a as f64 / 255.0;
        p.b = f64_bound(0.0, p.b as f64 / a + 0.5, 255.0) as u8;
        p.g = f64_bound(0.0, p.g as f64 / a + 0.5, 255.0) as u8;
        p.r = f64_bound(0.0, p.r as f64 / a + 0.5, 255.0) as u8;
    }
}


#[inline]
fn bound(min: i32, val: i32, max: i32) -> i32 {
    core::cmp::max(min, core::cmp::min(max, val))
}

/// Like `f64::clamp`, but maps NaN to `min`.
#[inline]
fn f64_bound(min: f64, val: f64, max: f64) -> f64 {
    debug_assert!(min.is_finite());
    debug_assert!(max.is_finite());

    if val > max {
        max
    } else if val < min {
        min
    } else if val.is_nan() {
        min
    } else {
        val
    }
}

/// Converts an 8-bit sample value into a channel.
///
/// Rounds to the nearest integer and clamps to `0..=255`.
#[inline]
fn round_channel(val: f64) -> u8 {
    f64_bound(0.0, val + 0.5, 255.0) as u8
}


trait FuzzyEq<Rhs: ?Sized = Self> {
    fn fuzzy_eq(&self, other: &Rhs) -> bool;

    #[inline]
    fn fuzzy_ne(&self, other: &Rhs) -> bool {
        !self.fuzzy_eq(other)
    }
}

trait FuzzyZero: FuzzyEq {
    fn is_fuzzy_zero(&self) -> bool;
}

impl FuzzyEq for f64 {
    #[inline]
    fn fuzzy_eq(&self, other: &f64) -> bool {
        self.approx_eq_ulps(other, 4)
    }
}

impl FuzzyZero for f64 {
    #[inline]
    fn is_fuzzy_zero(&self) -> bool {
        self.fuzzy_eq(&0.0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_fit() {
        let r = Region::new(-5, 2, 20, 30).fit_to(10, 10);
        assert_eq!(r, Region::new(0, 2, 10, 10));
        assert_eq!(r.width(), 10);
        assert_eq!(r.height(), 8);
    }

    #[test]
    fn region_inverted_is_empty() {
        let r = Region::new(5, 5, 1, 1);
        assert!(r.is_empty());
        assert!(!r.contains(5, 5));
    }

    #[test]
    fn region_outside_is_empty() {
        let r = Region::new(20, 20, 30, 30).fit_to(10, 10);
        assert!(r.is_empty());
    }

    #[test]
    fn alpha_mask_zeroes_rgb() {
        let data = [RGBA8::new(10, 20, 30, 40), RGBA8::new(255, 255, 255, 255)];
        assert_eq!(alpha_mask(&data), vec![RGBA8::new(0, 0, 0, 40), RGBA8::new(0, 0, 0, 255)]);
    }

    #[test]
    fn demultiply_transparent() {
        let mut data = [RGBA8::new(0, 0, 0, 0)];
        demultiply_alpha(&mut data);
        assert_eq!(data[0], RGBA8::new(0, 0, 0, 0));
    }

    #[test]
    fn multiply_demultiply_opaque() {
        let mut data = [RGBA8::new(10, 128, 250, 255)];
        multiply_alpha(&mut data);
        demultiply_alpha(&mut data);
        assert_eq!(data[0], RGBA8::new(10, 128, 250, 255));
    }

    #[test]
    fn round_channel_clamps() {
        assert_eq!(round_channel(-3.0), 0);
        assert_eq!(round_channel(300.0), 255);
        assert_eq!(round_channel(54.18), 54);
        assert_eq!(round_channel(f64::NAN), 0);
        assert_eq!(round_channel(254.6), 255);
        assert_eq!(round_channel(0.4), 0);
    }
}
