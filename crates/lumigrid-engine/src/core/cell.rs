use super::{color::ColorMask, item::ItemKind};

/// A cell of the immutable target grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetCell {
    #[default]
    Empty,
    Obstacle,
    /// A crystal that wants exactly this accumulated color (1..=6).
    Crystal(ColorMask),
}

impl TargetCell {
    /// Parses the target alphabet `'.'`, `'X'`, `'1'..='6'`.
    #[must_use]
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Empty),
            'X' => Some(Self::Obstacle),
            _ => ColorMask::from_target_digit(glyph).map(Self::Crystal),
        }
    }

    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Obstacle => 'X',
            Self::Crystal(color) => color.digit(),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn crystal_color(self) -> Option<ColorMask> {
        match self {
            Self::Crystal(color) => Some(color),
            _ => None,
        }
    }
}

/// A cell of the derived result grid.
///
/// Crystals carry the light accumulated so far (mask 0 = never reached);
/// `Item` overlays a placed glyph on what is an empty cell of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultCell {
    #[default]
    Empty,
    Obstacle,
    Crystal(ColorMask),
    Item(ItemKind),
}

impl ResultCell {
    /// The baseline value before any items are overlaid: obstacles and empty
    /// cells copy through, crystals start unlit.
    #[must_use]
    pub const fn baseline(target: TargetCell) -> Self {
        match target {
            TargetCell::Empty => Self::Empty,
            TargetCell::Obstacle => Self::Obstacle,
            TargetCell::Crystal(_) => Self::Crystal(ColorMask::UNLIT),
        }
    }

    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Obstacle => 'X',
            Self::Crystal(color) => color.digit(),
            Self::Item(kind) => kind.glyph(),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}
