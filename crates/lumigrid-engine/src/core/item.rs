use serde::{Deserialize, Serialize};

use super::color::PrimaryColor;
use crate::ItemCategory;

/// The closed set of placeable things.
///
/// The wire protocol tags these with single characters (`'1'`, `'2'`, `'4'`
/// for lanterns, `'/'` and `'\'` for mirrors, `'X'` for obstacles); inside
/// the engine everything is matched exhaustively on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Emits light in the four axis directions.
    Lantern(PrimaryColor),
    /// The `/` mirror: reflects `(dr, dc)` to `(-dc, -dr)`.
    MirrorForward,
    /// The `\` mirror: reflects `(dr, dc)` to `(dc, dr)`.
    MirrorBackward,
    /// Blocks any beam reaching it.
    Obstacle,
}

/// A glyph outside the `{'1','2','4','/','\\','X'}` alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "invalid item type {glyph:?}: only lanterns of primary colors (1, 2 or 4), \
     mirrors (/ or \\) and obstacles (X) can be placed"
)]
pub struct UnknownGlyphError {
    pub glyph: char,
}

impl ItemKind {
    pub fn from_glyph(glyph: char) -> Result<Self, UnknownGlyphError> {
        match glyph {
            '/' => Ok(Self::MirrorForward),
            '\\' => Ok(Self::MirrorBackward),
            'X' => Ok(Self::Obstacle),
            _ => PrimaryColor::from_digit(glyph)
                .map(Self::Lantern)
                .ok_or(UnknownGlyphError { glyph }),
        }
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Lantern(color) => color.digit(),
            Self::MirrorForward => '/',
            Self::MirrorBackward => '\\',
            Self::Obstacle => 'X',
        }
    }

    #[must_use]
    pub const fn category(self) -> ItemCategory {
        match self {
            Self::Lantern(_) => ItemCategory::Lantern,
            Self::MirrorForward | Self::MirrorBackward => ItemCategory::Mirror,
            Self::Obstacle => ItemCategory::Obstacle,
        }
    }

    #[must_use]
    pub const fn lantern_color(self) -> Option<PrimaryColor> {
        match self {
            Self::Lantern(color) => Some(color),
            _ => None,
        }
    }
}

/// One placed item.
///
/// `valid` is meaningful only for lanterns: the propagation engine resets it
/// to `true` at the start of every recompute and clears it if any beam
/// reaches the lantern's cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub row: usize,
    pub col: usize,
    pub kind: ItemKind,
    pub valid: bool,
}

impl Item {
    #[must_use]
    pub fn new(row: usize, col: usize, kind: ItemKind) -> Self {
        Self {
            row,
            col,
            kind,
            valid: true,
        }
    }
}
