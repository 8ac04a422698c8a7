// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgfilters::MorphologyOperator;

use super::{Attributes, Input, Kind};

/// A morphology filter primitive.
///
/// `feMorphology` element in the SVG.
#[derive(Clone, Debug)]
pub struct Morphology {
    /// Identifies input for the given filter primitive.
    ///
    /// `in` in the SVG.
    pub input: Input,

    /// A filter operator.
    ///
    /// `operator` in the SVG.
    pub operator: MorphologyOperator,

    /// A filter radius along the X-axis.
    ///
    /// `radius` in the SVG. Never negative.
    pub radius_x: f64,

    /// A filter radius along the Y-axis.
    ///
    /// `radius` in the SVG. Never negative.
    pub radius_y: f64,
}

pub(crate) fn convert(attrs: Attributes) -> Kind {
    let operator = match attrs.get("operator").unwrap_or("erode") {
        "dilate" => MorphologyOperator::Dilate,
        _ => MorphologyOperator::Erode,
    };

    let (rx, ry) = attrs.number_pair("radius").unwrap_or((0.0, 0.0));

    Kind::Morphology(Morphology {
        input: attrs.input("in"),
        operator,
        radius_x: if rx > 0.0 { rx } else { 0.0 },
        radius_y: if ry > 0.0 { ry } else { 0.0 },
    })
}
