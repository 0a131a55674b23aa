//! The thirteen Celtic month names.
//!
//! Twelve regular months, Samonios to Cantlos, plus Sonnocingos, the
//! intercalary month that only exists in cycle positions 3 and 5.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Celtic month, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum CelticMonth {
    Samonios,
    Dumannios,
    Riuros,
    Anagantios,
    Ogronios,
    Cutios,
    Giamonios,
    Simivisonios,
    Equos,
    Elembivos,
    Aedrinios,
    Cantlos,
    Sonnocingos,
}

/// All 13 months in order (index 0 = Samonios, 12 = Sonnocingos).
pub const ALL_MONTHS: [CelticMonth; 13] = [
    CelticMonth::Samonios,
    CelticMonth::Dumannios,
    CelticMonth::Riuros,
    CelticMonth::Anagantios,
    CelticMonth::Ogronios,
    CelticMonth::Cutios,
    CelticMonth::Giamonios,
    CelticMonth::Simivisonios,
    CelticMonth::Equos,
    CelticMonth::Elembivos,
    CelticMonth::Aedrinios,
    CelticMonth::Cantlos,
    CelticMonth::Sonnocingos,
];

impl CelticMonth {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Samonios => "Samonios",
            Self::Dumannios => "Dumannios",
            Self::Riuros => "Riuros",
            Self::Anagantios => "Anagantios",
            Self::Ogronios => "Ogronios",
            Self::Cutios => "Cutios",
            Self::Giamonios => "Giamonios",
            Self::Simivisonios => "Simivisonios",
            Self::Equos => "Equos",
            Self::Elembivos => "Elembivos",
            Self::Aedrinios => "Aedrinios",
            Self::Cantlos => "Cantlos",
            Self::Sonnocingos => "Sonnocingos",
        }
    }

    /// 0-based index (Samonios=0 .. Sonnocingos=12).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Month at a 0-based index.
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_MONTHS.get(index).copied()
    }

    /// True for the intercalary month.
    pub const fn is_intercalary(self) -> bool {
        matches!(self, Self::Sonnocingos)
    }
}

impl std::fmt::Display for CelticMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CelticMonth {
    type Err = CalendarError;

    /// Case-insensitive month name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_MONTHS
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CalendarError::InvalidInput(format!("unknown month name: {s}")))
    }
}
