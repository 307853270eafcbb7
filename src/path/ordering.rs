//! Tie-break orderings for ranked path generation.

use std::cmp::Ordering;

use crate::concept::Concept;

/// Ordering applied when several concepts have all prerequisites placed.
///
/// [`Canonical`](Self::Canonical) defines the best path; the other variants
/// relax its secondary keys to produce alternative-but-still-valid paths.
/// Every variant ends in the concept id, so each ordering is total and two
/// runs over the same input can never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    /// Complexity ascending, estimated hours ascending, title lexicographic.
    Canonical,
    /// Estimated hours ascending first, frontloading quick wins.
    HoursFirst,
    /// Complexity ascending, then the secondary keys reversed.
    SecondaryReversed,
}

impl TieBreak {
    /// The relaxed orderings used to produce alternative paths.
    pub const ALTERNATIVES: [TieBreak; 2] = [TieBreak::HoursFirst, TieBreak::SecondaryReversed];

    /// Compares two ready concepts under this tie-break.
    #[must_use]
    pub fn compare(self, a: &Concept, b: &Concept) -> Ordering {
        let by_hours = |x: &Concept, y: &Concept| x.estimated_hours.total_cmp(&y.estimated_hours);
        match self {
            TieBreak::Canonical => a
                .complexity
                .cmp(&b.complexity)
                .then_with(|| by_hours(a, b))
                .then_with(|| a.title.cmp(&b.title))
                .then_with(|| a.id.cmp(&b.id)),
            TieBreak::HoursFirst => by_hours(a, b)
                .then_with(|| a.complexity.cmp(&b.complexity))
                .then_with(|| a.title.cmp(&b.title))
                .then_with(|| a.id.cmp(&b.id)),
            TieBreak::SecondaryReversed => a
                .complexity
                .cmp(&b.complexity)
                .then_with(|| by_hours(a, b).reverse())
                .then_with(|| a.title.cmp(&b.title).reverse())
                .then_with(|| a.id.cmp(&b.id)),
        }
    }
}
