//! Continuity registry
//!
//! Elements in mutually exclusive render branches (a thumbnail in a collapsed
//! stack, the same thumbnail in a grid, the enlarged image in a detail view)
//! can share a [`ContinuityId`]. The registry remembers which element last
//! owned each id and where it was, so when a new owner appears the engine
//! animates one object moving instead of cross-fading two.

use std::fmt;

use neat_core::Rect;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::target::ElementKey;

new_key_type! {
    /// Handle to a registry entry
    pub struct EntryId;
}

/// Shared identity token, e.g. `album-2`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuityId(pub String);

impl ContinuityId {
    pub fn new(id: impl Into<String>) -> Self {
        ContinuityId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContinuityId {
    fn from(s: &str) -> Self {
        ContinuityId(s.to_string())
    }
}

impl From<String> for ContinuityId {
    fn from(s: String) -> Self {
        ContinuityId(s)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    owner: ElementKey,
    bounds: Rect,
}

/// Key-to-element registry for shared identities
#[derive(Debug, Default)]
pub struct ContinuityRegistry {
    entries: SlotMap<EntryId, Entry>,
    by_id: FxHashMap<ContinuityId, EntryId>,
}

/// Result of claiming an id
#[derive(Clone, Debug, PartialEq)]
pub struct Handoff {
    /// Element that owned the id before, if it was a different one
    pub previous_owner: Option<ElementKey>,
    /// Where the id was last seen; the new owner animates from here
    pub from_bounds: Option<Rect>,
}

impl ContinuityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `owner` the current holder of `id` at `bounds`
    ///
    /// When the id was held by another element, the returned handoff carries
    /// that element and its last bounds.
    pub fn claim(&mut self, id: &ContinuityId, owner: &ElementKey, bounds: Rect) -> Handoff {
        match self.by_id.get(id).and_then(|&eid| self.entries.get_mut(eid)) {
            Some(entry) if &entry.owner != owner => {
                let previous_owner = std::mem::replace(&mut entry.owner, owner.clone());
                let from_bounds = std::mem::replace(&mut entry.bounds, bounds);
                tracing::debug!(%id, from = %previous_owner, to = %owner, "continuity handoff");
                Handoff {
                    previous_owner: Some(previous_owner),
                    from_bounds: Some(from_bounds),
                }
            }
            Some(entry) => {
                entry.bounds = bounds;
                Handoff {
                    previous_owner: None,
                    from_bounds: None,
                }
            }
            None => {
                let eid = self.entries.insert(Entry {
                    owner: owner.clone(),
                    bounds,
                });
                self.by_id.insert(id.clone(), eid);
                Handoff {
                    previous_owner: None,
                    from_bounds: None,
                }
            }
        }
    }

    /// Record where the current owner is right now (mid-flight bounds)
    pub fn track(&mut self, id: &ContinuityId, owner: &ElementKey, bounds: Rect) {
        if let Some(entry) = self.by_id.get(id).and_then(|&eid| self.entries.get_mut(eid)) {
            if &entry.owner == owner {
                entry.bounds = bounds;
            }
        }
    }

    pub fn owner(&self, id: &ContinuityId) -> Option<&ElementKey> {
        self.by_id
            .get(id)
            .and_then(|&eid| self.entries.get(eid))
            .map(|e| &e.owner)
    }

    pub fn bounds(&self, id: &ContinuityId) -> Option<Rect> {
        self.by_id
            .get(id)
            .and_then(|&eid| self.entries.get(eid))
            .map(|e| e.bounds)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_claim_has_no_handoff() {
        let mut registry = ContinuityRegistry::new();
        let handoff = registry.claim(
            &"album-0".into(),
            &"stack/0".into(),
            Rect::new(8.0, 13.0, 24.0, 24.0),
        );
        assert_eq!(handoff.previous_owner, None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_new_owner_receives_previous_bounds() {
        let mut registry = ContinuityRegistry::new();
        let id: ContinuityId = "album-1".into();
        let small = Rect::new(22.0, 13.0, 24.0, 24.0);
        let cell = Rect::new(208.0, 70.0, 162.0, 162.0);

        registry.claim(&id, &"stack/1".into(), small);
        let handoff = registry.claim(&id, &"grid/1".into(), cell);

        assert_eq!(handoff.previous_owner, Some("stack/1".into()));
        assert_eq!(handoff.from_bounds, Some(small));
        assert_eq!(registry.owner(&id), Some(&"grid/1".into()));
        assert_eq!(registry.bounds(&id), Some(cell));
    }

    #[test]
    fn test_track_ignores_non_owners() {
        let mut registry = ContinuityRegistry::new();
        let id: ContinuityId = "album-2".into();
        registry.claim(&id, &"grid/2".into(), Rect::ZERO);

        registry.track(&id, &"stack/2".into(), Rect::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(registry.bounds(&id), Some(Rect::ZERO));

        registry.track(&id, &"grid/2".into(), Rect::new(2.0, 2.0, 2.0, 2.0));
        assert_eq!(registry.bounds(&id), Some(Rect::new(2.0, 2.0, 2.0, 2.0)));
    }
}
