//! Conversation collection ordering.
//!
//! The sidebar order is derived state: favorites sort before non-favorites,
//! most recently active first within each group, with the identifier as a
//! deterministic tiebreak so equal timestamps cannot make the list jitter
//! between renders. Every store mutation that can affect order runs its
//! result through [`reorder`].

use std::cmp::Ordering;
use std::collections::HashSet;

use super::model::Conversation;

/// Normalizes a conversation collection: drops duplicate identifiers (first
/// occurrence wins) and sorts into the canonical display order.
///
/// The resulting order is total (for any two conversations exactly one
/// ordering holds) and the function is idempotent on already-sorted input.
pub fn reorder(conversations: Vec<Conversation>) -> Vec<Conversation> {
    let mut seen = HashSet::new();
    let mut deduped: Vec<Conversation> = conversations
        .into_iter()
        .filter(|conversation| seen.insert(conversation.id.clone()))
        .collect();

    deduped.sort_by(compare);
    deduped
}

/// Canonical comparator: favorite first, then `updated_at` descending, then
/// identifier ascending.
fn compare(a: &Conversation, b: &Conversation) -> Ordering {
    b.favorite
        .cmp(&a.favorite)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| a.id.cmp(&b.id))
}
