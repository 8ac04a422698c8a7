// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgfilters::BlendMode;

use super::{Attributes, Input, Kind};

/// A blend filter primitive.
///
/// `feBlend` element in the SVG.
#[derive(Clone, Debug)]
pub struct Blend {
    /// Identifies input for the given filter primitive.
    ///
    /// `in` in the SVG.
    pub input1: Input,

    /// Identifies input for the given filter primitive.
    ///
    /// `in2` in the SVG.
    pub input2: Input,

    /// A blending mode.
    ///
    /// `mode` in the SVG.
    pub mode: BlendMode,
}

pub(crate) fn convert(attrs: Attributes) -> Kind {
    let mode = match attrs.get("mode").unwrap_or("normal") {
        "multiply"  => BlendMode::Multiply,
        "screen"    => BlendMode::Screen,
        "darken"    => BlendMode::Darken,
        "lighten"   => BlendMode::Lighten,
        _ => BlendMode::Normal,
    };

    Kind::Blend(Blend {
        input1: attrs.input("in"),
        input2: attrs.input("in2"),
        mode,
    })
}
