// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Options, Units};
use super::{Attributes, Input, Kind};

/// An offset filter primitive.
///
/// `feOffset` element in the SVG.
#[derive(Clone, Debug)]
pub struct Offset {
    /// Identifies input for the given filter primitive.
    ///
    /// `in` in the SVG.
    pub input: Input,

    /// The amount to offset the input graphic along the X-axis.
    pub dx: f64,

    /// The amount to offset the input graphic along the Y-axis.
    pub dy: f64,
}

pub(crate) fn convert(attrs: Attributes, primitive_units: Units, opt: &Options) -> Kind {
    Kind::Offset(Offset {
        input: attrs.input("in"),
        dx: attrs.length("dx", primitive_units, opt).unwrap_or(0.0),
        dy: attrs.length("dy", primitive_units, opt).unwrap_or(0.0),
    })
}
