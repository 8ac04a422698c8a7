// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Error {
    /// A filter primitive element was started outside of a `filter` element.
    NoFilter,

    /// A `filter` element was started inside another `filter` element.
    NestedFilter,

    /// `feMergeNode` or `feFuncX` was not preceded by a matching parent primitive.
    ///
    /// `feMergeNode` requires `feMerge` and `feFuncX` requires `feComponentTransfer`.
    NoParentPrimitive,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NoFilter => {
                write!(f, "a filter primitive outside of a filter element")
            }
            Error::NestedFilter => {
                write!(f, "nested filter elements are not allowed")
            }
            Error::NoParentPrimitive => {
                write!(f, "a filter child element without a matching parent primitive")
            }
        }
    }
}

impl std::error::Error for Error {}
