// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{Attributes, Input, Kind};

/// A component-wise remapping filter primitive.
///
/// `feComponentTransfer` element in the SVG.
#[derive(Clone, Debug)]
pub struct ComponentTransfer {
    /// Identifies input for the given filter primitive.
    ///
    /// `in` in the SVG.
    pub input: Input,

    /// `feFuncR` in the SVG.
    pub func_r: TransferFunction,

    /// `feFuncG` in the SVG.
    pub func_g: TransferFunction,

    /// `feFuncB` in the SVG.
    pub func_b: TransferFunction,

    /// `feFuncA` in the SVG.
    pub func_a: TransferFunction,
}

/// A transfer function used by `ComponentTransfer`.
///
/// <https://www.w3.org/TR/SVG11/filters.html#transferFuncElements>
#[derive(Clone, PartialEq, Debug)]
pub enum TransferFunction {
    /// Keeps a component as is.
    Identity,

    /// Applies a linear interpolation to a component.
    ///
    /// The number list can be empty.
    Table(Vec<f64>),

    /// Applies a step function to a component.
    ///
    /// The number list can be empty.
    Discrete(Vec<f64>),

    /// Applies a linear shift to a component.
    #[allow(missing_docs)]
    Linear {
        slope: f64,
        intercept: f64,
    },

    /// Applies an exponential shift to a component.
    #[allow(missing_docs)]
    Gamma {
        amplitude: f64,
        exponent: f64,
        offset: f64,
    },
}

impl_enum_default!(TransferFunction, Identity);

impl TransferFunction {
    pub(crate) fn as_raster(&self) -> svgfilters::TransferFunction<'_> {
        match *self {
            TransferFunction::Identity => svgfilters::TransferFunction::Identity,
            TransferFunction::Table(ref values) => svgfilters::TransferFunction::Table(values),
            TransferFunction::Discrete(ref values) => svgfilters::TransferFunction::Discrete(values),
            TransferFunction::Linear { slope, intercept } => {
                svgfilters::TransferFunction::Linear { slope, intercept }
            }
            TransferFunction::Gamma { amplitude, exponent, offset } => {
                svgfilters::TransferFunction::Gamma { amplitude, exponent, offset }
            }
        }
    }
}

pub(crate) fn convert(attrs: Attributes) -> Kind {
    Kind::ComponentTransfer(ComponentTransfer {
        input: attrs.input("in"),
        func_r: TransferFunction::Identity,
        func_g: TransferFunction::Identity,
        func_b: TransferFunction::Identity,
        func_a: TransferFunction::Identity,
    })
}

/// Applies an `feFuncX` element to its parent.
///
/// Returns `false` for an unknown tag.
pub(crate) fn convert_func(fe: &mut ComponentTransfer, tag: &str, attrs: Attributes) -> bool {
    let func = match tag {
        "feFuncR" => &mut fe.func_r,
        "feFuncG" => &mut fe.func_g,
        "feFuncB" => &mut fe.func_b,
        "feFuncA" => &mut fe.func_a,
        _ => return false,
    };

    *func = convert_transfer_function(attrs);
    true
}

fn convert_transfer_function(attrs: Attributes) -> TransferFunction {
    match attrs.get("type").unwrap_or_default() {
        "table" => {
            TransferFunction::Table(attrs.number_list("tableValues").unwrap_or_default())
        }
        "discrete" => {
            TransferFunction::Discrete(attrs.number_list("tableValues").unwrap_or_default())
        }
        "linear" => {
            TransferFunction::Linear {
                slope: attrs.number("slope").unwrap_or(1.0),
                intercept: attrs.number("intercept").unwrap_or(0.0),
            }
        }
        "gamma" => {
            TransferFunction::Gamma {
                amplitude: attrs.number("amplitude").unwrap_or(1.0),
                exponent: attrs.number("exponent").unwrap_or(1.0),
                offset: attrs.number("offset").unwrap_or(0.0),
            }
        }
        _ => TransferFunction::Identity,
    }
}
