use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ColorMask, TargetCell, TargetGrid, engine::playfield::Playfield};

/// Points deducted per placed item of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    pub lantern: u32,
    pub mirror: u32,
    pub obstacle: u32,
}

/// Upper bounds on placed mirrors and obstacles. Lantern count is bounded
/// only by board area and cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budgets {
    pub max_mirrors: usize,
    pub max_obstacles: usize,
}

/// One puzzle to grade: the target grid plus the pricing and budget
/// parameters sent to the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub target: TargetGrid,
    pub costs: CostModel,
    pub budgets: Budgets,
}

/// Seed for deterministic instance generation.
///
/// A 128-bit value rendered as 32 hex digits, so a test case can be named by
/// its seed on the command line and in saved files. The same seed always
/// produces the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {text:?}: expected 1 to 32 hex digits")]
pub struct ParseSeedError {
    pub text: String,
}

impl fmt::Display for InstanceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for InstanceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 32 {
            return Err(ParseSeedError {
                text: s.to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError {
            text: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for InstanceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InstanceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows drawing a random `InstanceSeed` with `rng.random()`.
impl Distribution<InstanceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> InstanceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        InstanceSeed(seed)
    }
}

impl Instance {
    pub const MIN_SIZE: usize = 10;
    pub const MAX_SIZE: usize = TargetGrid::MAX_SIZE;

    /// Synthesizes a puzzle from the seed.
    ///
    /// Board sides are drawn from 10..=100; each cell becomes a crystal with
    /// probability 15..=25% (uniform color 1..=6) or an obstacle with
    /// probability 5..=15%. Costs are drawn as lantern 1..=10, mirror
    /// 3..=30, obstacle 2..=20, and the mirror/obstacle budgets scale with
    /// the crystal count (up to 1/8th and 1/16th of it respectively).
    #[must_use]
    pub fn generate(seed: InstanceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);

        let height = rng.random_range(Self::MIN_SIZE..=Self::MAX_SIZE);
        let width = rng.random_range(Self::MIN_SIZE..=Self::MAX_SIZE);
        let p_obstacle = rng.random_range(5..=15);
        let p_crystal = rng.random_range(15..=25);

        let mut cells = Vec::with_capacity(height * width);
        let mut num_crystals = 0;
        for _ in 0..height * width {
            let t = rng.random_range(0..100);
            let cell = if t < p_crystal {
                num_crystals += 1;
                let color = ColorMask::from_bits(rng.random_range(1..=6))
                    .expect("colors 1..=6 are valid masks");
                TargetCell::Crystal(color)
            } else if t < p_crystal + p_obstacle {
                TargetCell::Obstacle
            } else {
                TargetCell::Empty
            };
            cells.push(cell);
        }
        let target = TargetGrid::from_cells(height, width, cells);

        let costs = CostModel {
            lantern: rng.random_range(1..=10),
            mirror: rng.random_range(3..=30),
            obstacle: rng.random_range(2..=20),
        };
        let budgets = Budgets {
            max_mirrors: rng.random_range(0..=num_crystals / 8),
            max_obstacles: rng.random_range(0..=num_crystals / 16),
        };

        Self {
            target,
            costs,
            budgets,
        }
    }

    /// Builds a fresh playfield for one evaluation run.
    #[must_use]
    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.target.clone(), self.budgets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(text: &str) -> InstanceSeed {
        text.parse().unwrap()
    }

    #[test]
    fn test_seed_parse_and_display() {
        let parsed = seed("2a");
        assert_eq!(parsed.to_string(), format!("{:032x}", 0x2a));
        assert_eq!(seed(&parsed.to_string()), parsed);
    }

    #[test]
    fn test_seed_rejects_bad_text() {
        assert!("".parse::<InstanceSeed>().is_err());
        assert!("xyz".parse::<InstanceSeed>().is_err());
        assert!("0".repeat(33).parse::<InstanceSeed>().is_err());
    }

    #[test]
    fn test_seed_serde_round_trip() {
        let original = seed("deadbeef");
        let json = serde_json::to_string(&original).unwrap();
        let back: InstanceSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Instance::generate(seed("1"));
        let b = Instance::generate(seed("1"));
        assert_eq!(a, b);

        let c = Instance::generate(seed("2"));
        assert_ne!(a, c);
    }

    #[test]
    fn test_generated_parameters_in_range() {
        for text in ["1", "2", "3", "abc", "deadbeef"] {
            let instance = Instance::generate(seed(text));
            let target = &instance.target;
            assert!((Instance::MIN_SIZE..=Instance::MAX_SIZE).contains(&target.height()));
            assert!((Instance::MIN_SIZE..=Instance::MAX_SIZE).contains(&target.width()));
            assert!((1..=10).contains(&instance.costs.lantern));
            assert!((3..=30).contains(&instance.costs.mirror));
            assert!((2..=20).contains(&instance.costs.obstacle));
            let crystals = target.num_crystals();
            assert!(instance.budgets.max_mirrors <= crystals / 8);
            assert!(instance.budgets.max_obstacles <= crystals / 16);
        }
    }

    #[test]
    fn test_instance_serde_round_trip() {
        let instance = Instance::generate(seed("7"));
        let json = serde_json::to_string(&instance).unwrap();
        let back: Instance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instance);
    }
}
