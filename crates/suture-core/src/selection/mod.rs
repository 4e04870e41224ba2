//! Anchor selection strategies.
//!
//! A [`PointSelector`] turns the current body positions or picker state
//! into a [`Selection`]: nothing, one incomplete candidate, or a pair of
//! distinct anchors.
pub mod extremal;
pub mod manual;

use glam::DVec3;

use crate::config::SutureConfig;
use crate::error::RequiredInput;
use crate::math::{rest_length, Axis};
use crate::particle::PositionSource;
use crate::picking::PickerFeed;

pub use extremal::ExtremalSelector;
pub use manual::ManualSelector;

/// A particle eligible to become one endpoint of the suture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorCandidate {
    pub index: u32,
    pub position: DVec3,
}

impl AnchorCandidate {
    pub fn new(index: u32, position: DVec3) -> Self {
        Self { index, position }
    }
}

/// Result of one selection pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection {
    None,
    /// Incomplete: a single candidate. Ignored by the synthesizer.
    One(AnchorCandidate),
    /// Two candidates with distinct indices, in strategy order.
    Pair(AnchorCandidate, AnchorCandidate),
}

impl Selection {
    /// Build a pair, downgrading to `None` when both candidates share an index.
    pub fn pair(first: AnchorCandidate, second: AnchorCandidate) -> Self {
        if first.index == second.index {
            Selection::None
        } else {
            Selection::Pair(first, second)
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Selection::Pair(..))
    }

    /// Distance between the two anchors of a pair.
    pub fn rest_length(&self) -> Option<f64> {
        match self {
            Selection::Pair(a, b) => Some(rest_length(a.position, b.position)),
            _ => None,
        }
    }
}

/// A selection plus whether the inputs it read held a NaN or infinite
/// coordinate. A flagged scan may still yield a pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionScan {
    pub selection: Selection,
    pub non_finite: bool,
}

impl Default for SelectionScan {
    fn default() -> Self {
        Self {
            selection: Selection::None,
            non_finite: false,
        }
    }
}

/// External inputs visible to a selector during one update.
///
/// Both references must stay valid and unchanged for the whole update.
#[derive(Clone, Copy, Default)]
pub struct SelectionInputs<'a> {
    pub body: Option<&'a dyn PositionSource>,
    pub picker: Option<&'a dyn PickerFeed>,
}

impl<'a> SelectionInputs<'a> {
    pub fn body(body: &'a dyn PositionSource) -> Self {
        Self {
            body: Some(body),
            picker: None,
        }
    }

    pub fn picker(picker: &'a dyn PickerFeed) -> Self {
        Self {
            body: None,
            picker: Some(picker),
        }
    }

    pub fn with_picker(mut self, picker: &'a dyn PickerFeed) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Whether the input `required` is bound.
    pub fn has(&self, required: RequiredInput) -> bool {
        match required {
            RequiredInput::BodyPositions => self.body.is_some(),
            RequiredInput::PickerFeed => self.picker.is_some(),
        }
    }
}

/// The two anchor strategies, chosen at configuration time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointSelector {
    Manual(ManualSelector),
    AutomaticExtremal(ExtremalSelector),
}

impl PointSelector {
    pub fn from_config(config: &SutureConfig) -> Self {
        if config.auto_select {
            PointSelector::AutomaticExtremal(ExtremalSelector::new(config.axis))
        } else {
            PointSelector::Manual(ManualSelector)
        }
    }

    pub fn automatic(axis: Axis) -> Self {
        PointSelector::AutomaticExtremal(ExtremalSelector::new(axis))
    }

    /// The input this strategy cannot work without.
    pub fn required_input(&self) -> RequiredInput {
        match self {
            PointSelector::Manual(_) => RequiredInput::PickerFeed,
            PointSelector::AutomaticExtremal(_) => RequiredInput::BodyPositions,
        }
    }

    /// Select the current anchors. A missing input yields `Selection::None`.
    pub fn select(&self, inputs: &SelectionInputs<'_>) -> Selection {
        self.scan(inputs).selection
    }

    /// Like [`select`](Self::select), also reporting non-finite input.
    pub fn scan(&self, inputs: &SelectionInputs<'_>) -> SelectionScan {
        match self {
            PointSelector::Manual(manual) => match inputs.picker {
                Some(feed) => manual.scan(feed),
                None => SelectionScan::default(),
            },
            PointSelector::AutomaticExtremal(extremal) => match inputs.body {
                Some(body) => extremal.scan(body.positions()),
                None => SelectionScan::default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking::PickState;

    #[test]
    fn test_pair_with_same_index_is_none() {
        let a = AnchorCandidate::new(3, DVec3::ZERO);
        let b = AnchorCandidate::new(3, DVec3::X);
        assert_eq!(Selection::pair(a, b), Selection::None);
    }

    #[test]
    fn test_rest_length_only_for_pair() {
        let a = AnchorCandidate::new(0, DVec3::ZERO);
        let b = AnchorCandidate::new(1, DVec3::new(0.0, 4.0, 3.0));
        assert_eq!(Selection::pair(a, b).rest_length(), Some(5.0));
        assert_eq!(Selection::One(a).rest_length(), None);
        assert_eq!(Selection::None.rest_length(), None);
    }

    #[test]
    fn test_from_config_picks_strategy() {
        let auto = PointSelector::from_config(&SutureConfig::default());
        assert_eq!(auto, PointSelector::AutomaticExtremal(ExtremalSelector::new(Axis::X)));
        assert_eq!(auto.required_input(), RequiredInput::BodyPositions);

        let manual = PointSelector::from_config(&SutureConfig::manual());
        assert_eq!(manual, PointSelector::Manual(ManualSelector));
        assert_eq!(manual.required_input(), RequiredInput::PickerFeed);
    }

    #[test]
    fn test_missing_input_selects_nothing() {
        let body = vec![DVec3::ZERO, DVec3::X];
        let picks = PickState::new();

        let manual = PointSelector::Manual(ManualSelector);
        assert_eq!(manual.select(&SelectionInputs::body(&body)), Selection::None);

        let auto = PointSelector::automatic(Axis::X);
        assert_eq!(auto.select(&SelectionInputs::picker(&picks)), Selection::None);
        assert!(auto.select(&SelectionInputs::body(&body)).is_pair());
    }
}
