// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::cmp;
use std::collections::HashMap;
use std::rc::Rc;

use svgfilters::Region;

use crate::{Filter, Image, Input, Primitive, RenderState, Units};

/// A scale and translate part of a transform.
///
/// Rotation and skew are not supported by the filter regions.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Affine {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Affine {
    fn from_transform(ts: &tiny_skia::Transform) -> Self {
        Affine {
            sx: ts.sx as f64,
            sy: ts.sy as f64,
            tx: ts.tx as f64,
            ty: ts.ty as f64,
        }
    }

    fn from_bbox(bbox: BBox) -> Self {
        Affine {
            sx: bbox.width as f64,
            sy: bbox.height as f64,
            tx: bbox.x as f64,
            ty: bbox.y as f64,
        }
    }

    fn for_units(units: Units, ts: &tiny_skia::Transform, bbox: Option<BBox>) -> Option<Self> {
        match units {
            Units::UserSpaceOnUse => Some(Affine::from_transform(ts)),
            Units::ObjectBoundingBox => bbox.map(Affine::from_bbox),
        }
    }

    /// Maps a rectangle into a device one.
    ///
    /// Coordinates are normalized, so a negative scale never produces an inverted rectangle.
    fn map_rect(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64, f64, f64) {
        let x1 = self.sx * x + self.tx;
        let y1 = self.sy * y + self.ty;
        let x2 = self.sx * (x + width) + self.tx;
        let y2 = self.sy * (y + height) + self.ty;
        (x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    }
}


/// A tight bounding box of non-transparent pixels.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct BBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Finds a tight bounding box of pixels with any nonzero channel.
///
/// Returns `None` for a fully transparent image.
pub(crate) fn calc_bbox(image: &Image) -> Option<BBox> {
    let w = image.width();
    let h = image.height();
    let pixels = image.pixels();
    let is_used = |x: u32, y: u32| {
        let p = pixels[(y * w + x) as usize];
        p.r != 0 || p.g != 0 || p.b != 0 || p.a != 0
    };

    let row_used = |y: u32, x1: u32, x2: u32| (x1..x2).any(|x| is_used(x, y));
    let column_used = |x: u32, y1: u32, y2: u32| (y1..y2).any(|y| is_used(x, y));

    let top = (0..h).find(|&y| row_used(y, 0, w))?;
    let bottom = (top..h).rev().find(|&y| row_used(y, 0, w))?;
    let left = (0..w).find(|&x| column_used(x, top, bottom + 1))?;
    let right = (left..w).rev().find(|&x| column_used(x, top, bottom + 1))?;

    Some(BBox {
        x: left,
        y: top,
        width: right - left + 1,
        height: bottom - top + 1,
    })
}

fn to_region(rect: (f64, f64, f64, f64)) -> Region {
    let (x1, y1, x2, y2) = rect;
    Region::new(x1 as i32, y1 as i32, x2 as i32, y2 as i32)
}


/// A per-render state.
///
/// Resolves coordinates and keeps primitive results.
/// Every image in the context has the canvas size.
pub(crate) struct RenderContext {
    width: u32,
    height: u32,
    primitive_ts: Affine,
    filter_region: Region,
    source: Rc<Image>,
    background: Rc<Image>,
    last: Rc<Image>,
    results: HashMap<String, Rc<Image>>,
}

impl RenderContext {
    /// Creates a new context.
    ///
    /// Returns `None` when filter coordinates cannot be resolved
    /// or the filter region is empty.
    pub fn new(
        filter: &Filter,
        source: &Image,
        background: &Image,
        state: &RenderState,
    ) -> Option<Self> {
        let width = source.width();
        let height = source.height();

        let bbox = if    filter.units == Units::ObjectBoundingBox
                      || filter.primitive_units == Units::ObjectBoundingBox
        {
            calc_bbox(source)
        } else {
            None
        };

        let filter_ts = try_opt_warn_or!(
            Affine::for_units(filter.units, &state.transform, bbox), None,
            "Filter '{}' has an object bounding box units on an empty source. Skipped.", filter.id
        );

        let primitive_ts = try_opt_warn_or!(
            Affine::for_units(filter.primitive_units, &state.transform, bbox), None,
            "Filter '{}' has an object bounding box units on an empty source. Skipped.", filter.id
        );

        let filter_region = to_region(
            filter_ts.map_rect(filter.x, filter.y, filter.width, filter.height)
        ).fit_to(width, height);

        log::debug!(
            "Filter '{}': filter affine {:?}, primitive affine {:?}, region {:?}.",
            filter.id, filter_ts, primitive_ts, filter_region
        );

        if filter_region.is_empty() {
            log::warn!("Filter '{}' has an invalid region. Skipped.", filter.id);
            return None;
        }

        let source = Rc::new(source.clone());
        let background = if background.width() == width && background.height() == height {
            Rc::new(background.clone())
        } else {
            Rc::new(fit_background(background, width, height)?)
        };

        Some(RenderContext {
            width,
            height,
            primitive_ts,
            filter_region,
            source: source.clone(),
            background,
            last: source,
            results: HashMap::new(),
        })
    }

    #[inline]
    pub fn primitive_ts(&self) -> Affine {
        self.primitive_ts
    }

    /// Returns the result of the last executed primitive.
    ///
    /// The source image when no primitives were executed.
    #[inline]
    pub fn last_result(&self) -> Rc<Image> {
        self.last.clone()
    }

    /// Calculates a primitive bounds in device pixels.
    ///
    /// The result is always inside the filter region.
    pub fn bounds(&self, primitive: &Primitive) -> Region {
        if primitive.uses_default_region() {
            return self.filter_region;
        }

        // Missing subregion fields are taken from the filter region.
        let ts = self.primitive_ts;
        let fr = self.filter_region;
        let (mut x1, mut y1, mut x2, mut y2) = ts.map_rect(
            primitive.x.unwrap_or(0.0),
            primitive.y.unwrap_or(0.0),
            primitive.width.unwrap_or(0.0),
            primitive.height.unwrap_or(0.0),
        );

        if primitive.x.is_none() {
            x2 = fr.x1() as f64 + (x2 - x1);
            x1 = fr.x1() as f64;
        }

        if primitive.y.is_none() {
            y2 = fr.y1() as f64 + (y2 - y1);
            y1 = fr.y1() as f64;
        }

        if primitive.width.is_none() {
            x2 = x1 + fr.width() as f64;
        }

        if primitive.height.is_none() {
            y2 = y1 + fr.height() as f64;
        }

        let region = to_region((x1, y1, x2, y2));
        Region::new(
            cmp::max(region.x1(), fr.x1()),
            cmp::max(region.y1(), fr.y1()),
            cmp::min(region.x2(), fr.x2()),
            cmp::min(region.y2(), fr.y2()),
        ).fit_to(self.width, self.height)
    }

    /// Resolves a primitive input.
    ///
    /// Unknown references fall back to the last result.
    pub fn get_input(&self, input: &Input) -> Rc<Image> {
        match *input {
            Input::SourceGraphic => self.source.clone(),
            Input::BackgroundImage => self.background.clone(),
            Input::LastResult => self.last.clone(),
            Input::SourceAlpha => Rc::new(self.source.alpha_mask()),
            Input::BackgroundAlpha => Rc::new(self.background.alpha_mask()),
            Input::Reference(ref name) => {
                match self.results.get(name) {
                    Some(image) => image.clone(),
                    None => {
                        log::warn!("Unknown filter primitive reference '{}'. \
                                    The last result will be used.", name);
                        self.last.clone()
                    }
                }
            }
        }
    }

    /// Stores a primitive result.
    ///
    /// An image with an empty name becomes the last result only.
    pub fn store_result(&mut self, name: &str, image: Image) {
        let image = Rc::new(image);
        if !name.is_empty() {
            self.results.insert(name.to_string(), image.clone());
        }

        self.last = image;
    }
}

/// Copies a background of a different size into a canvas-sized image.
fn fit_background(background: &Image, width: u32, height: u32) -> Option<Image> {
    let mut image = Image::new(width, height)?;
    let region = Region::from_size(background.width(), background.height());
    svgfilters::alpha_blit(background.as_image_ref(), region, image.as_image_ref_mut(), 0, 0);
    Some(image)
}
