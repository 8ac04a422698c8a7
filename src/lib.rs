// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgfx` is an SVG filter effects pipeline.

Filters are collected from a stream of SVG elements using `FilterBuilder`,
looked up with `parse_filter_reference` and applied to a raster `Image` with `render`.

Raster operations are implemented by the [svgfilters](https://docs.rs/svgfilters) crate.

## Example

```
use svgfx::{FilterBuilder, Image, Options, RenderState};

let opt = Options::default();
let mut builder = FilterBuilder::new(&opt);
builder.start_element("filter", &[("id", "shadow")]).unwrap();
builder.start_element("feOffset", &[("dx", "2"), ("dy", "2")]).unwrap();
let filter = builder.end_element("filter").unwrap();

let source = Image::from_vec(vec![255; 8 * 8 * 4], 8, 8).unwrap();
let mut background = Image::new(8, 8).unwrap();
svgfx::render(&filter, &source, &mut background, &RenderState::default());
```
*/

#![doc(html_root_url = "https://docs.rs/svgfx/0.1.0")]

#![warn(missing_docs)]

pub use rgb::RGBA8;
pub use tiny_skia::Transform;
pub use svgfilters::{BlendMode, CompositeOperator, EdgeMode, MorphologyOperator};

#[macro_use] mod macros;
mod context;
mod error;
mod filter;
mod image;
mod options;
mod registry;
mod render;
mod units;

pub use crate::error::Error;
pub use crate::filter::*;
pub use crate::image::Image;
pub use crate::options::{Options, RenderState};
pub use crate::registry::{Definition, DefinitionRef, Registry, parse_filter_reference};
pub use crate::render::render;
pub use crate::units::Units;


/// Parses an enum value from its SVG name.
pub(crate) trait EnumFromStr {
    fn enum_from_str(s: &str) -> Option<Self>
        where Self: Sized;
}
