// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{Attributes, Input, Kind};

/// A merge filter primitive.
///
/// `feMerge` element in the SVG.
#[derive(Clone, Debug)]
pub struct Merge {
    /// List of input layers that should be merged.
    ///
    /// List of `feMergeNode`'s in the SVG.
    pub inputs: Vec<Input>,
}

pub(crate) fn convert(_: Attributes) -> Kind {
    Kind::Merge(Merge {
        inputs: Vec::new(),
    })
}

/// Appends an `feMergeNode` input.
pub(crate) fn convert_node(merge: &mut Merge, attrs: Attributes) {
    merge.inputs.push(attrs.input("in"));
}
