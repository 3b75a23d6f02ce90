use lumigrid_engine::{CostModel, Instance, ItemId, ItemKind, PlacementError, Playfield};

use crate::score::{ScoreReport, score};

/// A fully-decoded placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: i32,
    pub col: i32,
    pub kind: ItemKind,
}

/// A single `ROW COL TYPE` line from a candidate response or a placement
/// file, before glyph validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayItem {
    pub row: i32,
    pub col: i32,
    pub glyph: char,
}

/// Why an automated replay was aborted.
///
/// Placement failures and post-replay lantern invalidity are distinct fatal
/// conditions, but both resolve to the invalid sentinel score; the message
/// names the offending item index either way.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ReplayError {
    #[display("item {index}: {source}")]
    Placement {
        index: usize,
        source: PlacementError,
    },
    #[display("item {index}: a lantern must not be illuminated by any light ray")]
    InvalidLantern { index: usize },
}

/// Drives one evaluation run over an exclusively-owned playfield.
///
/// All mutation goes through [`apply`]/[`remove`], so the playfield has a
/// completed recompute behind it whenever the caller regains control; the
/// final [`finish`] only reads.
///
/// [`apply`]: Evaluation::apply
/// [`remove`]: Evaluation::remove
/// [`finish`]: Evaluation::finish
#[derive(Debug, Clone)]
pub struct Evaluation {
    playfield: Playfield,
    costs: CostModel,
}

impl Evaluation {
    #[must_use]
    pub fn new(instance: &Instance) -> Self {
        Self {
            playfield: instance.playfield(),
            costs: instance.costs,
        }
    }

    #[must_use]
    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Offers one placement to the validator. A rejection leaves the board
    /// untouched, so interactive callers can simply re-prompt.
    pub fn apply(&mut self, placement: Placement) -> Result<ItemId, PlacementError> {
        self.playfield
            .try_place(placement.row, placement.col, placement.kind)
    }

    /// Like [`Self::apply`], from an undecoded wire glyph.
    pub fn apply_glyph(&mut self, row: i32, col: i32, glyph: char) -> Result<ItemId, PlacementError> {
        self.playfield.try_place_glyph(row, col, glyph)
    }

    /// Removes the item at a cell.
    pub fn remove(&mut self, row: i32, col: i32) -> Result<ItemKind, PlacementError> {
        self.playfield.try_remove(row, col)
    }

    /// Replays a candidate's item list in order.
    ///
    /// The first rejected placement aborts immediately. After all items are
    /// on the board, the fully-recomputed lighting is checked: the first
    /// invalid lantern (by replay index) is also fatal.
    pub fn replay(&mut self, items: &[ReplayItem]) -> Result<(), ReplayError> {
        let mut placed = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let id = self
                .apply_glyph(item.row, item.col, item.glyph)
                .map_err(|source| ReplayError::Placement { index, source })?;
            placed.push(id);
        }
        for (index, id) in placed.into_iter().enumerate() {
            let invalid = self
                .playfield
                .item(id)
                .is_some_and(|item| matches!(item.kind, ItemKind::Lantern(_)) && !item.valid);
            if invalid {
                return Err(ReplayError::InvalidLantern { index });
            }
        }
        Ok(())
    }

    /// Scores the current board state.
    #[must_use]
    pub fn finish(&self) -> ScoreReport {
        score(&self.playfield, &self.costs)
    }
}

#[cfg(test)]
mod tests {
    use lumigrid_engine::{Budgets, CostModel, TargetGrid};

    use super::*;
    use crate::score::{INVALID_SCORE, PRIMARY_CRYSTAL_SCORE};

    fn instance(rows: &[&str]) -> Instance {
        Instance {
            target: TargetGrid::parse(rows).unwrap(),
            costs: CostModel {
                lantern: 2,
                mirror: 4,
                obstacle: 6,
            },
            budgets: Budgets {
                max_mirrors: 2,
                max_obstacles: 1,
            },
        }
    }

    fn item(row: i32, col: i32, glyph: char) -> ReplayItem {
        ReplayItem { row, col, glyph }
    }

    #[test]
    fn test_replay_and_score() {
        let mut evaluation = Evaluation::new(&instance(&["...", ".2.", "..."]));
        evaluation.replay(&[item(1, 0, '2')]).unwrap();
        let report = evaluation.finish();
        assert_eq!(report.score, PRIMARY_CRYSTAL_SCORE - 2);
    }

    #[test]
    fn test_replay_aborts_on_first_bad_placement() {
        let mut evaluation = Evaluation::new(&instance(&["...", ".2.", "..."]));
        let err = evaluation
            .replay(&[item(1, 0, '2'), item(9, 9, '1'), item(0, 0, '1')])
            .unwrap_err();
        assert!(matches!(err, ReplayError::Placement { index: 1, .. }));
        assert_eq!(err.to_string(), "item 1: (9, 9) is outside the 3x3 board");
        // The aborted replay still left the earlier item placed.
        assert_eq!(evaluation.playfield().items().count(), 1);
    }

    #[test]
    fn test_replay_reports_unknown_glyph_index() {
        let mut evaluation = Evaluation::new(&instance(&["...", ".2.", "..."]));
        let err = evaluation.replay(&[item(0, 0, 'Q')]).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Placement {
                index: 0,
                source: PlacementError::UnknownKind(_),
            }
        ));
    }

    #[test]
    fn test_replay_detects_invalid_lantern_after_recompute() {
        let mut evaluation = Evaluation::new(&instance(&["....."]));
        let err = evaluation
            .replay(&[item(0, 0, '1'), item(0, 4, '4')])
            .unwrap_err();
        // Both lanterns are invalid; the first by replay order is reported.
        assert_eq!(err, ReplayError::InvalidLantern { index: 0 });
        assert_eq!(evaluation.finish().score, INVALID_SCORE);
    }

    #[test]
    fn test_interactive_rejection_is_recoverable() {
        let mut evaluation = Evaluation::new(&instance(&["...", ".2.", "..."]));
        assert!(evaluation.apply_glyph(1, 1, '1').is_err());
        evaluation.apply_glyph(1, 0, '2').unwrap();
        evaluation.remove(1, 0).unwrap();
        evaluation.apply_glyph(1, 2, '2').unwrap();
        assert_eq!(evaluation.finish().score, PRIMARY_CRYSTAL_SCORE - 2);
    }
}
