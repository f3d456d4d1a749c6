//! The fixed combination table.

use serde::{Deserialize, Serialize};

use crate::tiles::PowerupKind;

/// Powerup kinds as the combination table sees them (both rocket
/// orientations are one class).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComboClass {
    Rocket,
    Bomb,
    ColorBomb,
    Propeller,
}

impl From<PowerupKind> for ComboClass {
    fn from(kind: PowerupKind) -> Self {
        match kind {
            PowerupKind::RocketH | PowerupKind::RocketV => ComboClass::Rocket,
            PowerupKind::Bomb => ComboClass::Bomb,
            PowerupKind::ColorBomb => ComboClass::ColorBomb,
            PowerupKind::Propeller => ComboClass::Propeller,
        }
    }
}

/// Effect of fusing two powerups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComboEffect {
    /// Full row and full column through the merge cell.
    Cross,
    /// 7×7 explosion around the merge cell.
    BigExplosion,
    /// Three full rows and three full columns through the merge cell.
    Band,
    /// Every tile of the color fires a row or column sweep.
    ColorSweep,
    /// 3×3 burst around every tile of the color.
    ColorBurst,
    /// Every cell on the board.
    ClearBoard,
    /// Propeller carries a rocket cross to its target.
    PropellerCross,
    /// Propeller carries a bomb blast to its target.
    PropellerBomb,
    /// Independently targeted 3×3 bursts.
    PropellerBursts { count: usize },
    /// No fused effect: both powerups fire on their own.
    Independent,
}

const COMBO_TABLE: [(ComboClass, ComboClass, ComboEffect); 10] = [
    (ComboClass::Rocket, ComboClass::Rocket, ComboEffect::Cross),
    (ComboClass::Rocket, ComboClass::Bomb, ComboEffect::Band),
    (ComboClass::Rocket, ComboClass::ColorBomb, ComboEffect::ColorSweep),
    (ComboClass::Rocket, ComboClass::Propeller, ComboEffect::PropellerCross),
    (ComboClass::Bomb, ComboClass::Bomb, ComboEffect::BigExplosion),
    (ComboClass::Bomb, ComboClass::ColorBomb, ComboEffect::ColorBurst),
    (ComboClass::Bomb, ComboClass::Propeller, ComboEffect::PropellerBomb),
    (ComboClass::ColorBomb, ComboClass::ColorBomb, ComboEffect::ClearBoard),
    (ComboClass::ColorBomb, ComboClass::Propeller, ComboEffect::PropellerBursts { count: 3 }),
    (ComboClass::Propeller, ComboClass::Propeller, ComboEffect::PropellerBursts { count: 2 }),
];

/// Look up the effect of fusing two kinds. Order does not matter.
///
/// ```
/// use match3_core::combos::{combo_effect, ComboEffect};
/// use match3_core::tiles::PowerupKind;
///
/// assert_eq!(combo_effect(PowerupKind::Bomb, PowerupKind::RocketV), ComboEffect::Band);
/// assert_eq!(combo_effect(PowerupKind::RocketH, PowerupKind::Bomb), ComboEffect::Band);
/// ```
#[must_use]
pub fn combo_effect(a: PowerupKind, b: PowerupKind) -> ComboEffect {
    let (a, b) = (ComboClass::from(a), ComboClass::from(b));
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    COMBO_TABLE
        .iter()
        .find(|(x, y, _)| *x == low && *y == high)
        .map_or(ComboEffect::Independent, |(_, _, effect)| *effect)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [PowerupKind; 5] = [
        PowerupKind::RocketH,
        PowerupKind::RocketV,
        PowerupKind::Bomb,
        PowerupKind::ColorBomb,
        PowerupKind::Propeller,
    ];

    #[test]
    fn test_lookup_is_order_independent() {
        for a in KINDS {
            for b in KINDS {
                assert_eq!(combo_effect(a, b), combo_effect(b, a), "{a:?} + {b:?}");
            }
        }
    }

    #[test]
    fn test_rocket_orientations_share_a_class() {
        assert_eq!(combo_effect(PowerupKind::RocketH, PowerupKind::RocketV), ComboEffect::Cross);
        assert_eq!(combo_effect(PowerupKind::RocketV, PowerupKind::RocketV), ComboEffect::Cross);
    }

    #[test]
    fn test_table_entries() {
        assert_eq!(combo_effect(PowerupKind::Bomb, PowerupKind::Bomb), ComboEffect::BigExplosion);
        assert_eq!(combo_effect(PowerupKind::ColorBomb, PowerupKind::RocketH), ComboEffect::ColorSweep);
        assert_eq!(combo_effect(PowerupKind::ColorBomb, PowerupKind::Bomb), ComboEffect::ColorBurst);
        assert_eq!(combo_effect(PowerupKind::ColorBomb, PowerupKind::ColorBomb), ComboEffect::ClearBoard);
        assert_eq!(combo_effect(PowerupKind::Propeller, PowerupKind::RocketV), ComboEffect::PropellerCross);
        assert_eq!(combo_effect(PowerupKind::Bomb, PowerupKind::Propeller), ComboEffect::PropellerBomb);
        assert_eq!(
            combo_effect(PowerupKind::Propeller, PowerupKind::ColorBomb),
            ComboEffect::PropellerBursts { count: 3 }
        );
        assert_eq!(
            combo_effect(PowerupKind::Propeller, PowerupKind::Propeller),
            ComboEffect::PropellerBursts { count: 2 }
        );
    }

    #[test]
    fn test_every_pair_is_listed() {
        for a in KINDS {
            for b in KINDS {
                assert_ne!(combo_effect(a, b), ComboEffect::Independent);
            }
        }
    }
}
