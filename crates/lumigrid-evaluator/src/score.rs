use std::fmt;

use lumigrid_engine::{CostModel, ItemCategory, ItemKind, Playfield, ResultCell, TargetCell};
use serde::{Deserialize, Serialize};

/// The sentinel returned whenever the solution is structurally invalid:
/// a protocol violation, a rejected placement during replay, or any lantern
/// left illuminated. It dominates every achievable regular score.
pub const INVALID_SCORE: i64 = -1_000_000;

/// Points for a crystal lit in exactly its target color.
pub const PRIMARY_CRYSTAL_SCORE: i64 = 20;
pub const SECONDARY_CRYSTAL_SCORE: i64 = 30;
/// Penalty for a crystal lit in any wrong non-zero color.
pub const WRONG_COLOR_PENALTY: i64 = 10;

/// The final score plus the counters behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: i64,
    pub correct_primary: usize,
    pub correct_secondary: usize,
    pub incorrect: usize,
    pub lanterns: usize,
    pub mirrors: usize,
    pub obstacles: usize,
}

impl ScoreReport {
    /// The report for a run aborted before any item survived scoring.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            score: INVALID_SCORE,
            correct_primary: 0,
            correct_secondary: 0,
            incorrect: 0,
            lanterns: 0,
            mirrors: 0,
            obstacles: 0,
        }
    }

    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        self.score == INVALID_SCORE
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {} (crystals: {} primary, {} secondary, {} incorrect; \
             items: {} lanterns, {} mirrors, {} obstacles)",
            self.score,
            self.correct_primary,
            self.correct_secondary,
            self.incorrect,
            self.lanterns,
            self.mirrors,
            self.obstacles,
        )
    }
}

/// Scores a finished playfield against its target.
///
/// Any invalid lantern short-circuits to [`INVALID_SCORE`]. Otherwise every
/// cell contributes independently: crystals pay out +20/+30 for an exact
/// primary/secondary match and -10 when lit in the wrong color (an unlit
/// crystal is free), and every placed item charges its cost. Target
/// obstacles are ignored.
#[must_use]
pub fn score(playfield: &Playfield, costs: &CostModel) -> ScoreReport {
    let lanterns = playfield.item_count(ItemCategory::Lantern);
    let mirrors = playfield.item_count(ItemCategory::Mirror);
    let obstacles = playfield.item_count(ItemCategory::Obstacle);

    if playfield.invalid_lanterns().next().is_some() {
        return ScoreReport {
            lanterns,
            mirrors,
            obstacles,
            ..ScoreReport::invalid()
        };
    }

    let mut report = ScoreReport {
        score: 0,
        correct_primary: 0,
        correct_secondary: 0,
        incorrect: 0,
        lanterns,
        mirrors,
        obstacles,
    };
    let target = playfield.target();
    for row in 0..target.height() {
        for col in 0..target.width() {
            match target.get(row, col) {
                TargetCell::Obstacle => {}
                TargetCell::Empty => {
                    if let ResultCell::Item(kind) = playfield.result().get(row, col) {
                        report.score -= item_cost(costs, kind);
                    }
                }
                TargetCell::Crystal(want) => {
                    let ResultCell::Crystal(got) = playfield.result().get(row, col) else {
                        continue;
                    };
                    if got == want {
                        if want.is_primary() {
                            report.score += PRIMARY_CRYSTAL_SCORE;
                            report.correct_primary += 1;
                        } else {
                            report.score += SECONDARY_CRYSTAL_SCORE;
                            report.correct_secondary += 1;
                        }
                    } else if !got.is_unlit() {
                        report.score -= WRONG_COLOR_PENALTY;
                        report.incorrect += 1;
                    }
                }
            }
        }
    }
    report
}

fn item_cost(costs: &CostModel, kind: ItemKind) -> i64 {
    let cost = match kind.category() {
        ItemCategory::Lantern => costs.lantern,
        ItemCategory::Mirror => costs.mirror,
        ItemCategory::Obstacle => costs.obstacle,
    };
    i64::from(cost)
}

#[cfg(test)]
mod tests {
    use lumigrid_engine::{Budgets, ItemKind, PrimaryColor, TargetGrid};

    use super::*;

    const COSTS: CostModel = CostModel {
        lantern: 3,
        mirror: 5,
        obstacle: 4,
    };

    fn playfield(rows: &[&str]) -> Playfield {
        Playfield::new(
            TargetGrid::parse(rows).unwrap(),
            Budgets {
                max_mirrors: 10,
                max_obstacles: 10,
            },
        )
    }

    #[test]
    fn test_empty_solution_scores_zero() {
        let field = playfield(&["..2..", "X...."]);
        let report = score(&field, &COSTS);
        assert_eq!(report.score, 0);
        assert_eq!(report.correct_primary, 0);
        assert_eq!(report.incorrect, 0);
    }

    #[test]
    fn test_correct_primary_crystal() {
        let mut field = playfield(&["...", ".2.", "..."]);
        field
            .try_place(1, 0, ItemKind::Lantern(PrimaryColor::Yellow))
            .unwrap();

        let report = score(&field, &COSTS);
        assert_eq!(report.score, PRIMARY_CRYSTAL_SCORE - i64::from(COSTS.lantern));
        assert_eq!(report.correct_primary, 1);
        assert_eq!(report.correct_secondary, 0);
        assert_eq!(report.lanterns, 1);
    }

    #[test]
    fn test_correct_secondary_crystal_from_two_lanterns() {
        let mut field = playfield(&["..3.."]);
        field
            .try_place(0, 0, ItemKind::Lantern(PrimaryColor::Blue))
            .unwrap();
        field
            .try_place(0, 4, ItemKind::Lantern(PrimaryColor::Yellow))
            .unwrap();

        let report = score(&field, &COSTS);
        assert_eq!(
            report.score,
            SECONDARY_CRYSTAL_SCORE - 2 * i64::from(COSTS.lantern),
        );
        assert_eq!(report.correct_secondary, 1);
        assert_eq!(report.lanterns, 2);
    }

    #[test]
    fn test_wrongly_lit_crystal() {
        let mut field = playfield(&["4.."]);
        field
            .try_place(0, 2, ItemKind::Lantern(PrimaryColor::Yellow))
            .unwrap();

        let report = score(&field, &COSTS);
        assert_eq!(report.score, -WRONG_COLOR_PENALTY - i64::from(COSTS.lantern));
        assert_eq!(report.incorrect, 1);
        assert_eq!(report.correct_primary, 0);
        assert_eq!(report.correct_secondary, 0);
    }

    #[test]
    fn test_unlit_crystal_is_free() {
        let mut field = playfield(&["2X..."]);
        field
            .try_place(0, 4, ItemKind::Lantern(PrimaryColor::Yellow))
            .unwrap();

        let report = score(&field, &COSTS);
        assert_eq!(report.score, -i64::from(COSTS.lantern));
        assert_eq!(report.incorrect, 0);
    }

    #[test]
    fn test_mirrors_and_obstacles_charge_their_costs() {
        let mut field = playfield(&["....."]);
        field.try_place(0, 0, ItemKind::MirrorForward).unwrap();
        field.try_place(0, 2, ItemKind::Obstacle).unwrap();

        let report = score(&field, &COSTS);
        assert_eq!(
            report.score,
            -i64::from(COSTS.mirror) - i64::from(COSTS.obstacle),
        );
        assert_eq!(report.mirrors, 1);
        assert_eq!(report.obstacles, 1);
    }

    #[test]
    fn test_invalid_lantern_forces_sentinel() {
        // The crystal in the top row is lit perfectly, but the two lanterns
        // in the bottom row illuminate each other.
        let mut field = playfield(&["..2..", "....."]);
        field
            .try_place(0, 0, ItemKind::Lantern(PrimaryColor::Yellow))
            .unwrap();
        field
            .try_place(1, 1, ItemKind::Lantern(PrimaryColor::Blue))
            .unwrap();
        field
            .try_place(1, 3, ItemKind::Lantern(PrimaryColor::Red))
            .unwrap();

        let report = score(&field, &COSTS);
        assert_eq!(report.score, INVALID_SCORE);
        assert!(report.is_invalid());
        assert_eq!(report.lanterns, 3);
    }
}
