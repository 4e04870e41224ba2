use crate::picking::PickerFeed;
use crate::selection::{AnchorCandidate, Selection, SelectionScan};

/// Anchors taken from an external picker: first pick first, second pick second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualSelector;

impl ManualSelector {
    /// `Pair` only when both picker sequences hold exactly two entries.
    pub fn select(&self, feed: &dyn PickerFeed) -> Selection {
        match (feed.picked_positions(), feed.picked_indices()) {
            (&[p0, p1], &[i0, i1]) => {
                Selection::pair(AnchorCandidate::new(i0, p0), AnchorCandidate::new(i1, p1))
            }
            (&[p], &[i]) => Selection::One(AnchorCandidate::new(i, p)),
            _ => Selection::None,
        }
    }

    /// Select, and report whether any picked position is NaN or infinite.
    pub fn scan(&self, feed: &dyn PickerFeed) -> SelectionScan {
        SelectionScan {
            selection: self.select(feed),
            non_finite: feed.picked_positions().iter().any(|p| !p.is_finite()),
        }
    }
}
