// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use crate::Filter;

/// A document definition.
#[derive(Clone, Debug)]
pub enum Definition {
    /// A `filter` element.
    Filter(Filter),
    /// Any other referencable element.
    Other,
}

/// A borrowed document definition.
#[derive(Clone, Copy, Debug)]
pub enum DefinitionRef<'a> {
    /// A `filter` element.
    Filter(&'a Filter),
    /// Any other referencable element.
    Other,
}

/// A lookup interface for document definitions by ID.
pub trait Registry {
    /// Returns a definition with the specified ID.
    fn lookup(&self, id: &str) -> Option<DefinitionRef<'_>>;
}

impl Registry for HashMap<String, Definition> {
    fn lookup(&self, id: &str) -> Option<DefinitionRef<'_>> {
        self.get(id).map(|def| match def {
            Definition::Filter(ref filter) => DefinitionRef::Filter(filter),
            Definition::Other => DefinitionRef::Other,
        })
    }
}

/// Resolves a `filter` attribute value like `url(#id)`.
///
/// Returns `None` when the value is malformed, the ID is unknown
/// or it points to a non-filter definition.
pub fn parse_filter_reference<'a, R: Registry + ?Sized>(registry: &'a R, value: &str) -> Option<&'a Filter> {
    let link = match svgtypes::FuncIRI::from_str(value) {
        Ok(link) => link.0,
        Err(_) => {
            log::warn!("Failed to parse a filter reference: '{}'.", value);
            return None;
        }
    };

    match registry.lookup(link) {
        Some(DefinitionRef::Filter(filter)) => Some(filter),
        Some(DefinitionRef::Other) => {
            log::warn!("'{}' is not a filter.", link);
            None
        }
        None => {
            log::warn!("Filter '{}' was not found.", link);
            None
        }
    }
}
