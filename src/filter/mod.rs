// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{EnumFromStr, Options, Units};
use crate::units;

mod blend;
mod builder;
mod color_matrix;
mod component_transfer;
mod composite;
mod convolve_matrix;
mod gaussian_blur;
mod merge;
mod morphology;
mod offset;

pub use self::blend::Blend;
pub use self::builder::FilterBuilder;
pub use self::color_matrix::{ColorMatrix, ColorMatrixKind};
pub use self::component_transfer::{ComponentTransfer, TransferFunction};
pub use self::composite::Composite;
pub use self::convolve_matrix::ConvolveMatrix;
pub use self::gaussian_blur::GaussianBlur;
pub use self::merge::Merge;
pub use self::morphology::Morphology;
pub use self::offset::Offset;

/// A filter element.
///
/// `filter` element in the SVG.
#[derive(Clone, Debug)]
pub struct Filter {
    /// Element's ID.
    ///
    /// Taken from the SVG itself.
    pub id: String,

    /// Region coordinate system units.
    ///
    /// `filterUnits` in the SVG.
    pub units: Units,

    /// Content coordinate system units.
    ///
    /// `primitiveUnits` in the SVG.
    pub primitive_units: Units,

    /// Filter region X coordinate, in `units`.
    pub x: f64,

    /// Filter region Y coordinate, in `units`.
    pub y: f64,

    /// Filter region width, in `units`.
    pub width: f64,

    /// Filter region height, in `units`.
    pub height: f64,

    /// A list of filter primitives in the document order.
    pub primitives: Vec<Primitive>,
}


/// A filter primitive element.
#[derive(Clone, Debug)]
pub struct Primitive {
    /// `x` coordinate of the filter subregion, in primitive units.
    pub x: Option<f64>,

    /// `y` coordinate of the filter subregion, in primitive units.
    pub y: Option<f64>,

    /// The filter subregion width, in primitive units.
    pub width: Option<f64>,

    /// The filter subregion height, in primitive units.
    pub height: Option<f64>,

    /// Assigned name for this filter primitive.
    ///
    /// `result` in the SVG. Empty when not set.
    pub result: String,

    /// Filter primitive kind.
    pub kind: Kind,
}

impl Primitive {
    /// Checks that the subregion was not set and the filter region should be used instead.
    pub fn uses_default_region(&self) -> bool {
           self.x.is_none()
        && self.y.is_none()
        && self.width.is_none()
        && self.height.is_none()
    }
}


/// A filter kind.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub enum Kind {
    Blend(Blend),
    ColorMatrix(ColorMatrix),
    ComponentTransfer(ComponentTransfer),
    Composite(Composite),
    ConvolveMatrix(ConvolveMatrix),
    GaussianBlur(GaussianBlur),
    Merge(Merge),
    Morphology(Morphology),
    Offset(Offset),
}

impl Kind {
    /// Checks that `Kind` has a specific input.
    pub fn has_input(&self, input: &Input) -> bool {
        match self {
            Kind::Blend(ref fe) => fe.input1 == *input || fe.input2 == *input,
            Kind::ColorMatrix(ref fe) => fe.input == *input,
            Kind::ComponentTransfer(ref fe) => fe.input == *input,
            Kind::Composite(ref fe) => fe.input1 == *input || fe.input2 == *input,
            Kind::ConvolveMatrix(ref fe) => fe.input == *input,
            Kind::GaussianBlur(ref fe) => fe.input == *input,
            Kind::Merge(ref fe) => fe.inputs.iter().any(|i| i == input),
            Kind::Morphology(ref fe) => fe.input == *input,
            Kind::Offset(ref fe) => fe.input == *input,
        }
    }
}


/// Identifies input for a filter primitive.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum Input {
    SourceGraphic,
    SourceAlpha,
    BackgroundImage,
    BackgroundAlpha,
    /// The result of the previous primitive.
    ///
    /// An empty or `none` input.
    LastResult,
    /// A named result of one of the previous primitives.
    Reference(String),
}

impl_enum_default!(Input, LastResult);

impl Input {
    /// Parses an `in` attribute value.
    pub fn parse(s: &str) -> Self {
        match s {
            "SourceGraphic" => Input::SourceGraphic,
            "SourceAlpha" => Input::SourceAlpha,
            "BackgroundImage" => Input::BackgroundImage,
            "BackgroundAlpha" => Input::BackgroundAlpha,
            "" | "none" => Input::LastResult,
            _ => Input::Reference(s.to_string()),
        }
    }
}


/// A list of element attributes.
#[derive(Clone, Copy)]
pub(crate) struct Attributes<'a> {
    list: &'a [(&'a str, &'a str)],
}

impl<'a> Attributes<'a> {
    pub fn new(list: &'a [(&'a str, &'a str)]) -> Self {
        Attributes { list }
    }

    /// Returns the last value of an attribute.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.list.iter().rev().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        units::parse_number(self.get(name)?)
    }

    pub fn number_pair(&self, name: &str) -> Option<(f64, f64)> {
        units::parse_number_pair(self.get(name)?)
    }

    pub fn number_list(&self, name: &str) -> Option<Vec<f64>> {
        Some(units::parse_number_list(self.get(name)?))
    }

    pub fn length(&self, name: &str, object_units: Units, opt: &Options) -> Option<f64> {
        let value = self.get(name)?;
        let n = units::parse_length(value, name, object_units, opt);
        if n.is_none() {
            log::warn!("Failed to parse {}='{}'. Using default.", name, value);
        }

        n
    }

    pub fn input(&self, name: &str) -> Input {
        self.get(name).map(Input::parse).unwrap_or_default()
    }

    pub fn parse<T: EnumFromStr>(&self, name: &str) -> Option<T> {
        T::enum_from_str(self.get(name)?)
    }
}


/// Converts a primitive element into a `Primitive`.
///
/// Returns `None` for non-primitive tags.
pub(crate) fn convert_primitive(
    tag: &str,
    attrs: Attributes,
    primitive_units: Units,
    opt: &Options,
) -> Option<Primitive> {
    let kind = match tag {
        "feBlend" => blend::convert(attrs),
        "feColorMatrix" => color_matrix::convert(attrs),
        "feComponentTransfer" => component_transfer::convert(attrs),
        "feComposite" => composite::convert(attrs),
        "feConvolveMatrix" => convolve_matrix::convert(attrs),
        "feGaussianBlur" => gaussian_blur::convert(attrs),
        "feMerge" => merge::convert(attrs),
        "feMorphology" => morphology::convert(attrs),
        "feOffset" => offset::convert(attrs, primitive_units, opt),
        _ => return None,
    };

    Some(Primitive {
        x: attrs.length("x", primitive_units, opt),
        y: attrs.length("y", primitive_units, opt),
        width: attrs.length("width", primitive_units, opt),
        height: attrs.length("height", primitive_units, opt),
        result: attrs.get("result").unwrap_or_default().to_string(),
        kind,
    })
}
