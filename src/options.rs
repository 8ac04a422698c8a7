// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Parsing options.
///
/// Used to resolve lengths in filter attributes.
#[derive(Clone, Debug)]
pub struct Options {
    /// Target DPI.
    ///
    /// Impacts units conversion.
    ///
    /// Default: 96.0
    pub dpi: f64,

    /// A default font size.
    ///
    /// Used to resolve `em` and `ex` units.
    ///
    /// Default: 12
    pub font_size: f64,

    /// The current viewport width.
    ///
    /// Used to resolve percentages along the X axis.
    ///
    /// Default: 100
    pub viewport_width: f64,

    /// The current viewport height.
    ///
    /// Used to resolve percentages along the Y axis.
    ///
    /// Default: 100
    pub viewport_height: f64,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            dpi: 96.0,
            font_size: 12.0,
            viewport_width: 100.0,
            viewport_height: 100.0,
        }
    }
}


/// Rendering state.
#[derive(Clone, Copy, Debug)]
pub struct RenderState {
    /// The current user space to device transform.
    pub transform: tiny_skia::Transform,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            transform: tiny_skia::Transform::identity(),
        }
    }
}

impl RenderState {
    /// Creates a new state with a provided transform.
    pub fn new(transform: tiny_skia::Transform) -> Self {
        RenderState { transform }
    }
}
