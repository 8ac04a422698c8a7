// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{Attributes, Input, Kind};

/// A Gaussian blur filter primitive.
///
/// `feGaussianBlur` element in the SVG.
#[derive(Clone, Debug)]
pub struct GaussianBlur {
    /// Identifies input for the given filter primitive.
    ///
    /// `in` in the SVG.
    pub input: Input,

    /// A standard deviation along the X-axis.
    ///
    /// `stdDeviation` in the SVG. Never negative.
    pub std_dev_x: f64,

    /// A standard deviation along the Y-axis.
    ///
    /// `stdDeviation` in the SVG. Never negative.
    pub std_dev_y: f64,
}

pub(crate) fn convert(attrs: Attributes) -> Kind {
    let (mut std_dev_x, mut std_dev_y) = attrs.number_pair("stdDeviation").unwrap_or((0.0, 0.0));
    if std_dev_x.is_sign_negative() || !std_dev_x.is_finite() {
        std_dev_x = 0.0;
    }

    if std_dev_y.is_sign_negative() || !std_dev_y.is_finite() {
        std_dev_y = 0.0;
    }

    Kind::GaussianBlur(GaussianBlur {
        input: attrs.input("in"),
        std_dev_x,
        std_dev_y,
    })
}
