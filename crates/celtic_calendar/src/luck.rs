//! Day luck from Celtic day parity and the coarse lunar phase.

use celtic_astro::LunarPhase;

/// Luck of a day, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LuckCategory {
    VeryLucky,
    Lucky,
    Neutral,
    Unlucky,
    VeryUnlucky,
}

/// All categories, best to worst.
pub const ALL_LUCK_CATEGORIES: [LuckCategory; 5] = [
    LuckCategory::VeryLucky,
    LuckCategory::Lucky,
    LuckCategory::Neutral,
    LuckCategory::Unlucky,
    LuckCategory::VeryUnlucky,
];

impl LuckCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::VeryLucky => "Very Lucky",
            Self::Lucky => "Lucky",
            Self::Neutral => "Neutral",
            Self::Unlucky => "Unlucky",
            Self::VeryUnlucky => "Very Unlucky",
        }
    }

    /// Bar strength in percent.
    pub const fn strength_percent(self) -> u8 {
        match self {
            Self::VeryLucky => 100,
            Self::Lucky => 70,
            Self::Neutral => 50,
            Self::Unlucky => 30,
            Self::VeryUnlucky => 10,
        }
    }
}

impl std::fmt::Display for LuckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Luck of a Celtic day under a lunar phase.
///
/// | phase | luck |
/// |---|---|
/// | Full Moon | Very Lucky |
/// | New Moon | Lucky on odd days, else Neutral |
/// | Waxing crescent/gibbous | Lucky |
/// | Waning crescent/gibbous | Neutral on even days, else Unlucky |
/// | quarters | Unlucky |
pub fn evaluate_luck(celtic_day: u32, phase: LunarPhase) -> LuckCategory {
    let odd = celtic_day % 2 == 1;
    match phase {
        LunarPhase::FullMoon => LuckCategory::VeryLucky,
        LunarPhase::NewMoon if odd => LuckCategory::Lucky,
        LunarPhase::NewMoon => LuckCategory::Neutral,
        p if p.is_waxing() => LuckCategory::Lucky,
        p if p.is_waning() && !odd => LuckCategory::Neutral,
        _ => LuckCategory::Unlucky,
    }
}
