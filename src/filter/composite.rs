// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgfilters::CompositeOperator;

use super::{Attributes, Input, Kind};

/// A composite filter primitive.
///
/// `feComposite` element in the SVG.
#[derive(Clone, Debug)]
pub struct Composite {
    /// Identifies input for the given filter primitive.
    ///
    /// `in` in the SVG.
    pub input1: Input,

    /// Identifies input for the given filter primitive.
    ///
    /// `in2` in the SVG.
    pub input2: Input,

    /// A compositing operation.
    ///
    /// `operator` in the SVG.
    pub operator: CompositeOperator,
}

pub(crate) fn convert(attrs: Attributes) -> Kind {
    let operator = match attrs.get("operator").unwrap_or("over") {
        "in"            => CompositeOperator::In,
        "out"           => CompositeOperator::Out,
        "atop"          => CompositeOperator::Atop,
        "xor"           => CompositeOperator::Xor,
        "arithmetic"    => {
            CompositeOperator::Arithmetic {
                k1: attrs.number("k1").unwrap_or(0.0),
                k2: attrs.number("k2").unwrap_or(0.0),
                k3: attrs.number("k3").unwrap_or(0.0),
                k4: attrs.number("k4").unwrap_or(0.0),
            }
        }
        _ => CompositeOperator::Over,
    };

    Kind::Composite(Composite {
        input1: attrs.input("in"),
        input2: attrs.input("in2"),
        operator,
    })
}
