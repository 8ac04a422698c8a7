// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{Attributes, Input, Kind};

/// A color matrix filter primitive.
///
/// `feColorMatrix` element in the SVG.
#[derive(Clone, Debug)]
pub struct ColorMatrix {
    /// Identifies input for the given filter primitive.
    ///
    /// `in` in the SVG.
    pub input: Input,

    /// A matrix kind.
    ///
    /// `type` in the SVG.
    pub kind: ColorMatrixKind,
}

/// A color matrix filter primitive kind.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum ColorMatrixKind {
    /// A row-major 4×5 matrix.
    ///
    /// Always contains 20 values.
    Matrix(Vec<f64>),
    Saturate(f64),
    /// A hue rotation angle, in radians.
    ///
    /// `values` in the SVG is used as is, without a degrees conversion.
    HueRotate(f64),
    LuminanceToAlpha,
}

impl ColorMatrixKind {
    /// Returns a matrix view used by the raster operation.
    pub(crate) fn as_raster(&self) -> svgfilters::ColorMatrix<'_> {
        match *self {
            ColorMatrixKind::Matrix(ref values) => {
                match <&[f64; 20]>::try_from(values.as_slice()) {
                    Ok(values) => svgfilters::ColorMatrix::Matrix(values),
                    Err(_) => svgfilters::ColorMatrix::Matrix(&ZERO_MATRIX),
                }
            }
            ColorMatrixKind::Saturate(v) => svgfilters::ColorMatrix::Saturate(v),
            ColorMatrixKind::HueRotate(v) => svgfilters::ColorMatrix::HueRotate(v),
            ColorMatrixKind::LuminanceToAlpha => svgfilters::ColorMatrix::LuminanceToAlpha,
        }
    }
}

static ZERO_MATRIX: [f64; 20] = [0.0; 20];

pub(crate) fn convert(attrs: Attributes) -> Kind {
    let kind = match attrs.get("type").unwrap_or("matrix") {
        "saturate" => {
            ColorMatrixKind::Saturate(attrs.number("values").unwrap_or(1.0))
        }
        "hueRotate" => {
            ColorMatrixKind::HueRotate(attrs.number("values").unwrap_or(0.0))
        }
        "luminanceToAlpha" => {
            ColorMatrixKind::LuminanceToAlpha
        }
        _ => {
            // A wrong number of values produces a zero matrix.
            match attrs.number_list("values") {
                Some(values) if values.len() == 20 => ColorMatrixKind::Matrix(values),
                _ => ColorMatrixKind::Matrix(vec![0.0; 20]),
            }
        }
    };

    Kind::ColorMatrix(ColorMatrix {
        input: attrs.input("in"),
        kind,
    })
}
