// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::{Length, LengthUnit as Unit};

use crate::Options;

/// A coordinate system units.
///
/// `filterUnits` and `primitiveUnits` in the SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Units {
    UserSpaceOnUse,
    ObjectBoundingBox,
}

impl_enum_from_str!(Units,
    "userSpaceOnUse"    => Units::UserSpaceOnUse,
    "objectBoundingBox" => Units::ObjectBoundingBox
);


/// Parses and resolves a length attribute.
///
/// `aid` selects the viewport side percentages are resolved against.
pub(crate) fn parse_length(value: &str, aid: &str, object_units: Units, opt: &Options) -> Option<f64> {
    let length = Length::from_str(value).ok()?;
    Some(convert_length(length, aid, object_units, opt))
}

pub(crate) fn convert_length(length: Length, aid: &str, object_units: Units, opt: &Options) -> f64 {
    let dpi = opt.dpi;
    let n = length.number;
    match length.unit {
        Unit::None | Unit::Px => n,
        Unit::Em => n * opt.font_size,
        Unit::Ex => n * opt.font_size / 2.0,
        Unit::In => n * dpi,
        Unit::Cm => n * dpi / 2.54,
        Unit::Mm => n * dpi / 25.4,
        Unit::Pt => n * dpi / 72.0,
        Unit::Pc => n * dpi / 6.0,
        Unit::Percent => {
            if object_units == Units::ObjectBoundingBox {
                n / 100.0
            } else {
                match aid {
                    "x" | "width" | "dx" => {
                        convert_percent(n, opt.viewport_width)
                    }
                    "y" | "height" | "dy" => {
                        convert_percent(n, opt.viewport_height)
                    }
                    _ => {
                        let vb_len = (
                              opt.viewport_width * opt.viewport_width
                            + opt.viewport_height * opt.viewport_height
                        ).sqrt() / 2.0_f64.sqrt();

                        convert_percent(n, vb_len)
                    }
                }
            }
        }
    }
}

fn convert_percent(n: f64, base: f64) -> f64 {
    base * n / 100.0
}

/// Parses the first number of a number list.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    svgtypes::NumberListParser::from(value).next()?.ok()
}

/// Parses a `number-optional-number` value.
///
/// The second number defaults to the first one.
/// Returns `None` for an empty list, invalid numbers or more than two numbers.
pub(crate) fn parse_number_pair(value: &str) -> Option<(f64, f64)> {
    let mut parser = svgtypes::NumberListParser::from(value);
    let x = parser.next()?.ok()?;
    let y = match parser.next() {
        Some(v) => v.ok()?,
        None => return Some((x, x)),
    };

    if parser.next().is_some() {
        return None;
    }

    Some((x, y))
}

/// Parses a number list.
///
/// Parsing stops at the first invalid number.
pub(crate) fn parse_number_list(value: &str) -> Vec<f64> {
    svgtypes::NumberListParser::from(value)
        .map_while(|n| n.ok())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_length {
        ($name:ident, $text:expr, $aid:expr, $units:expr, $result:expr) => {
            #[test]
            fn $name() {
                let opt = Options::default();
                assert_eq!(parse_length($text, $aid, $units, &opt), $result);
            }
        };
    }

    test_length!(length_plain, "10", "x", Units::UserSpaceOnUse, Some(10.0));
    test_length!(length_px, "10px", "x", Units::UserSpaceOnUse, Some(10.0));
    test_length!(length_in, "1in", "x", Units::UserSpaceOnUse, Some(96.0));
    test_length!(length_pt, "72pt", "x", Units::UserSpaceOnUse, Some(96.0));
    test_length!(length_em, "2em", "x", Units::UserSpaceOnUse, Some(24.0));
    test_length!(length_ex, "2ex", "x", Units::UserSpaceOnUse, Some(12.0));
    test_length!(length_percent_bbox, "50%", "x", Units::ObjectBoundingBox, Some(0.5));
    test_length!(length_percent_width, "50%", "width", Units::UserSpaceOnUse, Some(50.0));
    test_length!(length_percent_dy, "10%", "dy", Units::UserSpaceOnUse, Some(10.0));
    test_length!(length_invalid, "qwe", "x", Units::UserSpaceOnUse, None);

    #[test]
    fn percent_diagonal() {
        let opt = Options {
            viewport_width: 30.0,
            viewport_height: 40.0,
            ..Options::default()
        };
        // sqrt(30^2 + 40^2) / sqrt(2) = 50 / sqrt(2)
        let n = parse_length("100%", "r", Units::UserSpaceOnUse, &opt).unwrap();
        assert!((n - 50.0 / 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn number_pair() {
        assert_eq!(parse_number_pair("2"), Some((2.0, 2.0)));
        assert_eq!(parse_number_pair("2 3"), Some((2.0, 3.0)));
        assert_eq!(parse_number_pair("2,3"), Some((2.0, 3.0)));
        assert_eq!(parse_number_pair("2 3 4"), None);
        assert_eq!(parse_number_pair(""), None);
        assert_eq!(parse_number_pair("qwe"), None);
    }

    #[test]
    fn number_list() {
        assert_eq!(parse_number_list("1 2, 3"), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_number_list(""), Vec::<f64>::new());
    }

    #[test]
    fn number() {
        assert_eq!(parse_number("1.5"), Some(1.5));
        assert_eq!(parse_number("2 3"), Some(2.0));
        assert_eq!(parse_number("x"), None);
    }
}
