//! Inspection follow-up chains on the patient card and consultations list.
//!
//! DESIGN
//! ======
//! Expanding a grouped root fetches its whole chain once and caches it by
//! root id; collapsing drops the cache so the next expand re-fetches. Every
//! fetch carries a ticket, and a result whose ticket no longer matches (the
//! chain was collapsed or re-opened meanwhile) is discarded.

#[cfg(test)]
#[path = "chain_test.rs"]
mod chain_test;

use std::collections::HashMap;

use crate::net::types::InspectionPreview;

/// Nesting levels that still shift the card right; deeper levels align with the last.
pub const MAX_CHAIN_INDENT: usize = 3;
pub const CHAIN_INDENT_PX: usize = 20;

#[must_use]
pub fn indent_px(level: usize) -> usize {
    level.min(MAX_CHAIN_INDENT) * CHAIN_INDENT_PX
}

/// Inspections shown at the top level of a list.
#[must_use]
pub fn top_level(list: &[InspectionPreview], grouped: bool) -> Vec<&InspectionPreview> {
    list.iter()
        .filter(|p| !grouped || p.previous_id.is_none())
        .collect()
}

/// Whether the card shows an expand control.
#[must_use]
pub fn can_expand(inspection: &InspectionPreview, grouped: bool) -> bool {
    grouped && inspection.has_nested && inspection.previous_id.is_none()
}

/// Whether a follow-up can be started from this inspection.
#[must_use]
pub fn can_add_follow_up(inspection: &InspectionPreview) -> bool {
    !inspection.has_nested
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainEntry {
    Loading(u64),
    Loaded(Vec<InspectionPreview>),
}

/// What the caller must do after a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainToggle {
    Fetch(u64),
    Collapsed,
}

/// A chain member with its nesting level (root is level 0).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainRow {
    pub inspection: InspectionPreview,
    pub level: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainState {
    entries: HashMap<String, ChainEntry>,
    next_ticket: u64,
}

impl ChainState {
    pub fn toggle(&mut self, root_id: &str) -> ChainToggle {
        if self.entries.remove(root_id).is_some() {
            return ChainToggle::Collapsed;
        }
        self.next_ticket += 1;
        self.entries.insert(root_id.to_owned(), ChainEntry::Loading(self.next_ticket));
        ChainToggle::Fetch(self.next_ticket)
    }

    /// Store a fetched chain. Returns `false` if the result is stale.
    pub fn finish(&mut self, root_id: &str, ticket: u64, chain: Vec<InspectionPreview>) -> bool {
        match self.entries.get_mut(root_id) {
            Some(entry) if *entry == ChainEntry::Loading(ticket) => {
                *entry = ChainEntry::Loaded(chain);
                true
            }
            _ => false,
        }
    }

    /// Forget a failed fetch so the control returns to collapsed.
    pub fn fail(&mut self, root_id: &str, ticket: u64) {
        if self.entries.get(root_id) == Some(&ChainEntry::Loading(ticket)) {
            self.entries.remove(root_id);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_expanded(&self, root_id: &str) -> bool {
        self.entries.contains_key(root_id)
    }

    #[must_use]
    pub fn is_loading(&self, root_id: &str) -> bool {
        matches!(self.entries.get(root_id), Some(ChainEntry::Loading(_)))
    }

    /// Loaded followers of `root_id` with levels derived from their
    /// previous-inspection links; the root itself is excluded.
    #[must_use]
    pub fn rows(&self, root_id: &str) -> Vec<ChainRow> {
        let Some(ChainEntry::Loaded(chain)) = self.entries.get(root_id) else {
            return Vec::new();
        };
        let by_id: HashMap<&str, &InspectionPreview> = chain.iter().map(|p| (p.id.as_str(), p)).collect();
        let mut levels: HashMap<&str, usize> = HashMap::new();
        levels.insert(root_id, 0);

        let mut rows = Vec::new();
        for item in chain.iter().filter(|p| p.id != root_id) {
            rows.push(ChainRow { inspection: item.clone(), level: chain_level(item, &by_id, &mut levels) });
        }
        rows
    }
}

fn chain_level<'a>(
    item: &'a InspectionPreview,
    by_id: &HashMap<&'a str, &'a InspectionPreview>,
    levels: &mut HashMap<&'a str, usize>,
) -> usize {
    // Walk up until a known level; unknown parents anchor at level 0.
    let mut path: Vec<&'a str> = vec![item.id.as_str()];
    let mut base = 0;
    let mut cursor = item;
    while let Some(prev) = cursor.previous_id.as_deref() {
        if let Some(level) = levels.get(prev) {
            base = *level;
            break;
        }
        match by_id.get(prev) {
            Some(parent) if !path.contains(&prev) => {
                path.push(prev);
                cursor = parent;
            }
            _ => break,
        }
    }
    let mut level = base;
    for id in path.into_iter().rev() {
        level += 1;
        levels.entry(id).or_insert(level);
    }
    levels.get(item.id.as_str()).copied().unwrap_or(level)
}
