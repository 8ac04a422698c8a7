// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::{Length, LengthUnit};

use crate::{Error, Options, Units};
use crate::units::convert_length;
use super::{component_transfer, merge, Attributes, Filter, Kind};

/// A streaming `filter` element builder.
///
/// Receives elements in the document order and collects them into a `Filter`.
///
/// # Example
///
/// ```
/// let opt = svgfx::Options::default();
/// let mut builder = svgfx::FilterBuilder::new(&opt);
/// builder.start_element("filter", &[("id", "blur")]).unwrap();
/// builder.start_element("feGaussianBlur", &[("stdDeviation", "2")]).unwrap();
/// builder.end_element("feGaussianBlur");
/// let filter = builder.end_element("filter").unwrap();
/// assert_eq!(filter.id, "blur");
/// assert_eq!(filter.primitives.len(), 1);
/// ```
pub struct FilterBuilder<'a> {
    opt: &'a Options,
    filter: Option<Filter>,
}

impl<'a> FilterBuilder<'a> {
    /// Creates a new builder.
    pub fn new(opt: &'a Options) -> Self {
        FilterBuilder {
            opt,
            filter: None,
        }
    }

    /// Checks that a `filter` element is open.
    pub fn is_open(&self) -> bool {
        self.filter.is_some()
    }

    /// Processes an element start.
    pub fn start_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
        let attrs = Attributes::new(attrs);
        match tag {
            "filter" => {
                if self.filter.is_some() {
                    return Err(Error::NestedFilter);
                }

                self.filter = Some(convert_filter(attrs, self.opt));
            }
            "feMergeNode" => {
                match self.last_kind_mut()? {
                    Kind::Merge(ref mut fe) => merge::convert_node(fe, attrs),
                    _ => return Err(Error::NoParentPrimitive),
                }
            }
            "feFuncR" | "feFuncG" | "feFuncB" | "feFuncA" => {
                match self.last_kind_mut()? {
                    Kind::ComponentTransfer(ref mut fe) => {
                        component_transfer::convert_func(fe, tag, attrs);
                    }
                    _ => return Err(Error::NoParentPrimitive),
                }
            }
            _ => {
                let filter = match self.filter {
                    Some(ref mut filter) => filter,
                    None if is_primitive(tag) => return Err(Error::NoFilter),
                    None => {
                        log::warn!("'{}' is not supported. Skipped.", tag);
                        return Ok(());
                    }
                };

                match super::convert_primitive(tag, attrs, filter.primitive_units, self.opt) {
                    Some(primitive) => filter.primitives.push(primitive),
                    None => log::warn!("'{}' is not a supported filter primitive. Skipped.", tag),
                }
            }
        }

        Ok(())
    }

    /// Processes an element end.
    ///
    /// Returns a finished filter on a `filter` end.
    pub fn end_element(&mut self, tag: &str) -> Option<Filter> {
        if tag == "filter" {
            self.filter.take()
        } else {
            None
        }
    }

    fn last_kind_mut(&mut self) -> Result<&mut Kind, Error> {
        let filter = self.filter.as_mut().ok_or(Error::NoFilter)?;
        filter.primitives.last_mut()
            .map(|fe| &mut fe.kind)
            .ok_or(Error::NoParentPrimitive)
    }
}

fn is_primitive(tag: &str) -> bool {
    matches!(tag,
        "feBlend" | "feColorMatrix" | "feComponentTransfer" | "feComposite" |
        "feConvolveMatrix" | "feGaussianBlur" | "feMerge" | "feMorphology" | "feOffset"
    )
}

fn convert_filter(attrs: Attributes, opt: &Options) -> Filter {
    let units = attrs.parse("filterUnits").unwrap_or(Units::ObjectBoundingBox);
    let primitive_units = attrs.parse("primitiveUnits").unwrap_or(Units::UserSpaceOnUse);

    // Defaults are resolved in the same units as the attributes.
    let resolve = |name: &str, default: f64| {
        attrs.length(name, units, opt).unwrap_or_else(|| {
            convert_length(Length::new(default, LengthUnit::Percent), name, units, opt)
        })
    };

    Filter {
        id: attrs.get("id").unwrap_or_default().to_string(),
        units,
        primitive_units,
        x: resolve("x", -10.0),
        y: resolve("y", -10.0),
        width: resolve("width", 120.0),
        height: resolve("height", 120.0),
        primitives: Vec::new(),
    }
}
