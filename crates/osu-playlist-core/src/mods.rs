//! Gameplay mod abbreviations used in playlist annotations

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A gameplay modifier as written in a playlist annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mod {
    NoMod,
    Hidden,
    HardRock,
    Easy,
    DoubleTime,
    /// Free mod slot; star ratings also show the HR-equivalent value
    FreeMod,
    Tiebreaker,
    /// Any abbreviation without special meaning (kept for display)
    Other(String),
}

impl Mod {
    /// Parse a single abbreviation (case-insensitive)
    pub fn parse(abbrev: &str) -> Self {
        match abbrev.to_ascii_uppercase().as_str() {
            "NM" => Self::NoMod,
            "HD" => Self::Hidden,
            "HR" => Self::HardRock,
            "EZ" => Self::Easy,
            "DT" => Self::DoubleTime,
            "FM" => Self::FreeMod,
            "TB" => Self::Tiebreaker,
            other => Self::Other(other.to_string()),
        }
    }

    /// Two-letter abbreviation
    pub fn abbreviation(&self) -> &str {
        match self {
            Self::NoMod => "NM",
            Self::Hidden => "HD",
            Self::HardRock => "HR",
            Self::Easy => "EZ",
            Self::DoubleTime => "DT",
            Self::FreeMod => "FM",
            Self::Tiebreaker => "TB",
            Self::Other(s) => s,
        }
    }

    /// Legacy mod bit understood by the difficulty engine
    pub fn bits(&self) -> u32 {
        match self {
            Self::Easy => 2,
            Self::Hidden => 8,
            Self::HardRock => 16,
            Self::DoubleTime => 64,
            _ => 0,
        }
    }

    /// Badge fill color as RGB
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::NoMod => [0x10, 0x50, 0xeb],
            Self::Hidden => [0xeb, 0xb9, 0x10],
            Self::HardRock => [0xeb, 0x40, 0x40],
            Self::Easy => [0x40, 0xb9, 0x40],
            Self::DoubleTime => [0xb9, 0x10, 0xeb],
            Self::FreeMod => [0x40, 0x50, 0x7f],
            Self::Tiebreaker => [0x7f, 0x40, 0x50],
            Self::Other(_) => [0x60, 0x60, 0x60],
        }
    }

    /// NM, FM and TB cannot be combined with anything else
    fn is_standalone(&self) -> bool {
        matches!(self, Self::NoMod | Self::FreeMod | Self::Tiebreaker)
    }
}

impl fmt::Display for Mod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Ordered, de-duplicated set of mods
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSet {
    mods: Vec<Mod>,
}

impl ModSet {
    /// Create an empty mod set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a space-separated list of abbreviations, e.g. `"HD HR"`.
    ///
    /// The result is not validated; call [`ModSet::validate`] before use.
    pub fn parse(s: &str) -> Self {
        s.split_whitespace().map(Mod::parse).collect()
    }

    /// Add a mod, ignoring duplicates
    pub fn insert(&mut self, m: Mod) {
        if !self.mods.contains(&m) {
            self.mods.push(m);
        }
    }

    pub fn contains(&self, m: &Mod) -> bool {
        self.mods.contains(m)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Mod> + ExactSizeIterator {
        self.mods.iter()
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Check mutual exclusivity rules.
    ///
    /// EZ and HR exclude each other; NM, FM and TB exclude every other mod.
    pub fn validate(&self) -> Result<()> {
        let ez_and_hr = self.contains(&Mod::Easy) && self.contains(&Mod::HardRock);
        let standalone_mixed = self.len() > 1 && self.mods.iter().any(Mod::is_standalone);

        if ez_and_hr || standalone_mixed {
            return Err(Error::InvalidModCombination {
                mods: self.to_string(),
            });
        }
        Ok(())
    }

    /// Combined legacy bitmask for the difficulty engine
    pub fn bits(&self) -> u32 {
        self.mods.iter().fold(0, |acc, m| acc | m.bits())
    }

    /// Playback speed multiplier
    pub fn clock_rate(&self) -> f64 {
        if self.contains(&Mod::DoubleTime) {
            1.5
        } else {
            1.0
        }
    }
}

impl FromIterator<Mod> for ModSet {
    fn from_iter<I: IntoIterator<Item = Mod>>(iter: I) -> Self {
        let mut set = ModSet::new();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

impl fmt::Display for ModSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.mods {
            f.write_str(m.abbreviation())?;
        }
        Ok(())
    }
}
