use serde::{Deserialize, Serialize};

/// A 3-bit mask over the RYB primaries: bit 0 = blue, bit 1 = yellow,
/// bit 2 = red.
///
/// Target crystals use the six non-zero values below 7 (three single-bit
/// primaries and three two-bit secondaries). The zero mask is reserved for
/// "unlit" in the result grid; it is never a legal target color, so the two
/// meanings cannot collide. Beams merge into a crystal with [`union`], which
/// is commutative and idempotent, so arrival order never matters.
///
/// [`union`]: ColorMask::union
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ColorMask(u8);

impl ColorMask {
    pub const UNLIT: Self = Self(0);
    pub const BLUE: Self = Self(1);
    pub const YELLOW: Self = Self(2);
    pub const RED: Self = Self(4);
    pub const GREEN: Self = Self(3);
    pub const VIOLET: Self = Self(5);
    pub const ORANGE: Self = Self(6);

    /// Builds a mask from raw bits. `None` if any bit above the low three is
    /// set.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits <= 7 { Some(Self(bits)) } else { None }
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_unlit(self) -> bool {
        self.0 == 0
    }

    /// Exactly one primary component (blue, yellow or red).
    #[must_use]
    pub const fn is_primary(self) -> bool {
        self.0.count_ones() == 1
    }

    /// Exactly two primary components (green, violet or orange).
    #[must_use]
    pub const fn is_secondary(self) -> bool {
        self.0.count_ones() == 2
    }

    /// Parses the wire digit `'1'..='6'` used for target crystal colors.
    #[must_use]
    pub fn from_target_digit(digit: char) -> Option<Self> {
        let bits = digit.to_digit(10)?;
        if (1..=6).contains(&bits) {
            #[expect(clippy::cast_possible_truncation)]
            Some(Self(bits as u8))
        } else {
            None
        }
    }

    /// Renders the mask as the digit `'0'..='7'` used in result grid dumps.
    #[must_use]
    pub fn digit(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// The color of a single lantern. Lanterns only come in the three single-bit
/// primaries; secondaries exist only as merged light on a crystal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryColor {
    Blue,
    Yellow,
    Red,
}

impl PrimaryColor {
    pub const ALL: [Self; 3] = [Self::Blue, Self::Yellow, Self::Red];

    #[must_use]
    pub const fn mask(self) -> ColorMask {
        match self {
            Self::Blue => ColorMask::BLUE,
            Self::Yellow => ColorMask::YELLOW,
            Self::Red => ColorMask::RED,
        }
    }

    /// The wire digit for this lantern color (`'1'`, `'2'` or `'4'`).
    #[must_use]
    pub const fn digit(self) -> char {
        match self {
            Self::Blue => '1',
            Self::Yellow => '2',
            Self::Red => '4',
        }
    }

    #[must_use]
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::Blue),
            '2' => Some(Self::Yellow),
            '4' => Some(Self::Red),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_is_commutative_and_idempotent() {
        let a = ColorMask::BLUE;
        let b = ColorMask::YELLOW;
        assert_eq!(a.union(b), b.union(a));
        assert_eq!(a.union(b), ColorMask::GREEN);
        assert_eq!(a.union(a), a);
        assert_eq!(a.union(b).union(b), ColorMask::GREEN);
    }

    #[test]
    fn test_primary_and_secondary_partition() {
        for color in PrimaryColor::ALL {
            assert!(color.mask().is_primary());
            assert!(!color.mask().is_secondary());
        }
        for mask in [ColorMask::GREEN, ColorMask::VIOLET, ColorMask::ORANGE] {
            assert!(mask.is_secondary());
            assert!(!mask.is_primary());
        }
        assert!(!ColorMask::UNLIT.is_primary());
        assert!(!ColorMask::UNLIT.is_secondary());
    }

    #[test]
    fn test_target_digit_range() {
        for digit in ['1', '2', '3', '4', '5', '6'] {
            let mask = ColorMask::from_target_digit(digit).unwrap();
            assert_eq!(mask.digit(), digit);
        }
        assert_eq!(ColorMask::from_target_digit('0'), None);
        assert_eq!(ColorMask::from_target_digit('7'), None);
        assert_eq!(ColorMask::from_target_digit('x'), None);
    }

    #[test]
    fn test_lantern_digits_round_trip() {
        for color in PrimaryColor::ALL {
            assert_eq!(PrimaryColor::from_digit(color.digit()), Some(color));
        }
        assert_eq!(PrimaryColor::from_digit('3'), None);
    }
}
