// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use rgb::{ComponentBytes, FromSlice, RGBA8};

/// A raster image used by the filter pipeline.
///
/// Unpremultiplied RGBA color type is used.
/// Pixels are stored row by row without padding.
#[derive(Clone, PartialEq, Debug)]
pub struct Image {
    data: Vec<RGBA8>,
    width: u32,
    height: u32,
}

impl Image {
    /// Creates a new, transparent image.
    ///
    /// Returns `None` when `width` or `height` is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let len = (width as usize).checked_mul(height as usize)?;
        Some(Image {
            data: vec![RGBA8::default(); len],
            width,
            height,
        })
    }

    /// Creates an image from unpremultiplied RGBA bytes.
    ///
    /// Returns `None` when `data.len()` != `width * height * 4`
    /// or when `width` or `height` is zero.
    pub fn from_vec(data: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let len = (width as usize).checked_mul(height as usize)?.checked_mul(4)?;
        if data.len() != len {
            return None;
        }

        Some(Image {
            data: data.as_rgba().to_vec(),
            width,
            height,
        })
    }

    /// Creates an image from a `tiny_skia` pixmap.
    ///
    /// Pixmap's alpha is demultiplied.
    pub fn from_pixmap(pixmap: tiny_skia::Pixmap) -> Self {
        let width = pixmap.width();
        let height = pixmap.height();

        let mut data = pixmap.take();
        svgfilters::demultiply_alpha(data.as_rgba_mut());

        Image {
            data: data.as_rgba().to_vec(),
            width,
            height,
        }
    }

    /// Converts the image into a `tiny_skia` pixmap.
    ///
    /// Image's alpha is premultiplied.
    pub fn to_pixmap(&self) -> Option<tiny_skia::Pixmap> {
        let mut data = self.data.clone();
        svgfilters::multiply_alpha(&mut data);

        let size = tiny_skia::IntSize::from_wh(self.width, self.height)?;
        tiny_skia::Pixmap::from_vec(data.as_bytes().to_vec(), size)
    }

    /// Returns the image width.
    ///
    /// Never zero.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    ///
    /// Never zero.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of bytes in a row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Returns the image pixels.
    #[inline]
    pub fn pixels(&self) -> &[RGBA8] {
        &self.data
    }

    /// Returns the mutable image pixels.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [RGBA8] {
        &mut self.data
    }

    /// Returns a pixel at the specified position.
    ///
    /// Returns `None` when the position is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.data.get((y * self.width + x) as usize).copied()
    }

    /// Returns the image content as `u8` slice.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Returns the underlying data as RGBA bytes.
    pub fn take(self) -> Vec<u8> {
        self.data.as_bytes().to_vec()
    }

    /// Builds an image that keeps only this image's alpha channel.
    ///
    /// RGB channels are set to zero.
    pub fn alpha_mask(&self) -> Self {
        Image {
            data: svgfilters::alpha_mask(&self.data),
            width: self.width,
            height: self.height,
        }
    }

    /// Creates a transparent image of the same size.
    pub(crate) fn new_cleared(&self) -> Self {
        Image {
            data: vec![RGBA8::default(); self.data.len()],
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn as_image_ref(&self) -> svgfilters::ImageRef {
        svgfilters::ImageRef::new(&self.data, self.width, self.height)
    }

    pub(crate) fn as_image_ref_mut(&mut self) -> svgfilters::ImageRefMut {
        svgfilters::ImageRefMut::new(&mut self.data, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size() {
        assert!(Image::new(0, 10).is_none());
        assert!(Image::from_vec(Vec::new(), 0, 0).is_none());
    }

    #[test]
    fn from_vec_len() {
        assert!(Image::from_vec(vec![0; 15], 2, 2).is_none());
        let img = Image::from_vec(vec![7; 16], 2, 2).unwrap();
        assert_eq!(img.stride(), 8);
        assert_eq!(img.pixel(1, 1), Some(RGBA8::new(7, 7, 7, 7)));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn pixmap_roundtrip_opaque() {
        let img = Image::from_vec(vec![10, 20, 30, 255, 0, 0, 0, 0], 2, 1).unwrap();
        let pixmap = img.to_pixmap().unwrap();
        assert_eq!(Image::from_pixmap(pixmap), img);
    }

    #[test]
    fn alpha_mask() {
        let img = Image::from_vec(vec![10, 20, 30, 40], 1, 1).unwrap();
        assert_eq!(img.alpha_mask().data(), &[0, 0, 0, 40]);
    }
}
