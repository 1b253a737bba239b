//! The closed registry of part specifications.

use crate::builtin;
use crate::error::{CatalogError, CatalogResult};
use crate::part::Part;
use crate::route::Transitions;
use gf_geometry::{Placement, rotated_size};
use std::collections::BTreeMap;
use tracing::warn;

/// Static behavior record for one part type.
///
/// Plain function pointers: the part type set is closed, and every
/// behavior is a pure function of the authored `Part`.
#[derive(Clone, Copy)]
pub struct PartSpec {
    pub type_id: &'static str,
    /// Unrotated footprint in cells, as a function of settings.
    pub size: fn(&Part) -> (u32, u32),
    /// Local flow routes, as a function of settings and runtime flags.
    pub transitions: fn(&Part) -> Transitions,
    /// Optional user toggle (pump on/off, valve open/close). Mutates the
    /// part's authored fields; the caller re-solves afterwards.
    pub interact: Option<fn(&mut Part)>,
}

impl core::fmt::Debug for PartSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PartSpec")
            .field("type_id", &self.type_id)
            .field("interact", &self.interact.is_some())
            .finish()
    }
}

/// Registry mapping part type ids to their specifications.
///
/// Immutable after construction; shared read-only across solves.
#[derive(Debug, Default)]
pub struct Catalog {
    specs: BTreeMap<&'static str, PartSpec>,
}

impl Catalog {
    /// An empty catalog (for tests that register their own types).
    pub fn new() -> Self {
        Self::default()
    }

    /// The full built-in part set.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for spec in builtin::all() {
            catalog.register(spec);
        }
        catalog
    }

    pub fn register(&mut self, spec: PartSpec) {
        self.specs.insert(spec.type_id, spec);
    }

    /// Look up a part type's specification.
    pub fn spec_for(&self, type_id: &str) -> CatalogResult<&PartSpec> {
        self.specs
            .get(type_id)
            .ok_or_else(|| CatalogError::UnknownPartType {
                type_id: type_id.to_string(),
            })
    }

    /// Footprint of a placed part, honoring rotation (width/height swap
    /// on quarter turns). Unknown part types are inert: zero footprint.
    pub fn size_of(&self, part: &Part) -> (u32, u32) {
        match self.spec_for(&part.type_id) {
            Ok(spec) => rotated_size(part.rotation(), (spec.size)(part)),
            Err(_) => (0, 0),
        }
    }

    /// A part's local transitions.
    ///
    /// Closed parts contribute no routes (but still report zero flow via
    /// their snapshot); unknown types are inert and logged.
    pub fn transitions_for(&self, part: &Part) -> Transitions {
        if part.closed {
            return Transitions::new();
        }
        match self.spec_for(&part.type_id) {
            Ok(spec) => (spec.transitions)(part),
            Err(err) => {
                warn!(%err, "treating unknown part type as inert");
                Transitions::new()
            }
        }
    }

    /// The grid placement of a part (position + rotation + flip + size).
    pub fn placement(&self, part: &Part) -> Placement {
        Placement {
            position: (part.x, part.y),
            rotation: part.rotation(),
            flipped: part.flipped,
            size: match self.spec_for(&part.type_id) {
                Ok(spec) => (spec.size)(part),
                Err(_) => (0, 0),
            },
        }
    }

    /// Apply a part's interaction toggle, if it has one. Returns whether
    /// the part changed (callers re-solve when it did).
    pub fn interact(&self, part: &mut Part) -> bool {
        match self.spec_for(&part.type_id) {
            Ok(PartSpec {
                interact: Some(handler),
                ..
            }) => {
                handler(part);
                true
            }
            _ => false,
        }
    }
}
