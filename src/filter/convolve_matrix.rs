// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgfilters::EdgeMode;

use super::{Attributes, Input, Kind};

/// A matrix convolution filter primitive.
///
/// `feConvolveMatrix` element in the SVG.
#[derive(Clone, Debug)]
pub struct ConvolveMatrix {
    /// Identifies input for the given filter primitive.
    ///
    /// `in` in the SVG.
    pub input: Input,

    /// A number of kernel columns.
    ///
    /// `order` in the SVG. Zero for an empty kernel.
    pub order_x: u32,

    /// A number of kernel rows.
    ///
    /// `order` in the SVG. Zero for an empty kernel.
    pub order_y: u32,

    /// A row-major kernel.
    ///
    /// `kernelMatrix` in the SVG. Contains exactly `order_x * order_y` values.
    pub matrix: Vec<f64>,

    /// A matrix divisor.
    ///
    /// `divisor` in the SVG. Always positive or resolved from the kernel sum.
    pub divisor: f64,

    /// A bias, in 8-bit sample units.
    ///
    /// `bias` in the SVG.
    pub bias: f64,

    /// A target column.
    ///
    /// `targetX` in the SVG.
    pub target_x: u32,

    /// A target row.
    ///
    /// `targetY` in the SVG.
    pub target_y: u32,

    /// A kernel unit length, in primitive units.
    ///
    /// `kernelUnitLength` in the SVG.
    pub unit_length: Option<(f64, f64)>,

    /// An edges processing mode.
    ///
    /// `edgeMode` in the SVG.
    pub edge_mode: EdgeMode,

    /// An alpha preserving flag.
    ///
    /// `preserveAlpha` in the SVG.
    pub preserve_alpha: bool,
}

pub(crate) fn convert(attrs: Attributes) -> Kind {
    let (mut order_x, mut order_y) = match attrs.number_pair("order") {
        Some((x, y)) if x >= 1.0 && y >= 1.0 => (x as u32, y as u32),
        Some(_) => (0, 0),
        None => (3, 3),
    };

    let mut matrix = attrs.number_list("kernelMatrix").unwrap_or_default();
    let count = order_x as usize * order_y as usize;
    if matrix.len() < count {
        order_x = 0;
        order_y = 0;
        matrix.clear();
    } else {
        matrix.truncate(count);
    }

    let mut divisor = attrs.number("divisor").unwrap_or(0.0);
    if !(divisor > 0.0) {
        divisor = matrix.iter().sum();
        if divisor == 0.0 {
            divisor = 1.0;
        }
    }

    let target_x = parse_target(attrs.number("targetX"), order_x);
    let target_y = parse_target(attrs.number("targetY"), order_y);

    let edge_mode = match attrs.get("edgeMode").unwrap_or("duplicate") {
        "none" => EdgeMode::None,
        "wrap" => EdgeMode::Wrap,
        _ => EdgeMode::Duplicate,
    };

    Kind::ConvolveMatrix(ConvolveMatrix {
        input: attrs.input("in"),
        order_x,
        order_y,
        matrix,
        divisor,
        bias: attrs.number("bias").unwrap_or(0.0),
        target_x,
        target_y,
        unit_length: attrs.number_pair("kernelUnitLength"),
        edge_mode,
        preserve_alpha: attrs.get("preserveAlpha") == Some("true"),
    })
}

fn parse_target(target: Option<f64>, order: u32) -> u32 {
    let default = order / 2;
    match target {
        Some(n) if n >= 0.0 && n < order as f64 => n as u32,
        _ => default,
    }
}
