use crate::models::mods::Mods;

/// The four osu! play styles, as stored in `play_mode`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    Standard = 0,
    Taiko = 1,
    Catch = 2,
    Mania = 3,
}

impl TryFrom<u8> for Mode {
    type Error = std::io::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use std::io::{Error, ErrorKind};

        match value {
            0 => Ok(Mode::Standard),
            1 => Ok(Mode::Taiko),
            2 => Ok(Mode::Catch),
            3 => Ok(Mode::Mania),
            _ => Err(Error::new(ErrorKind::InvalidData, "invalid mode")),
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CustomGamemode {
    Vanilla = 0,
    Relax = 1,
    Autopilot = 2,
}

/// The column a leaderboard is ordered by.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Scoring {
    Score,
    Performance,
}

impl Scoring {
    pub const fn sort_column(&self) -> &'static str {
        match self {
            Scoring::Score => "score",
            Scoring::Performance => "pp",
        }
    }
}

impl CustomGamemode {
    /// Never fails: any mask without the relax or autopilot bit is vanilla.
    /// Relax takes precedence when both bits are present.
    pub fn from_mods(mods: Mods) -> CustomGamemode {
        if mods.has_any(Mods::Relax) {
            CustomGamemode::Relax
        } else if mods.has_any(Mods::Autopilot) {
            CustomGamemode::Autopilot
        } else {
            CustomGamemode::Vanilla
        }
    }

    pub const fn scores_table(&self) -> &'static str {
        match self {
            CustomGamemode::Vanilla => "scores",
            CustomGamemode::Relax => "scores_relax",
            CustomGamemode::Autopilot => "scores_ap",
        }
    }

    pub const fn scoring(&self) -> Scoring {
        match self {
            CustomGamemode::Vanilla => Scoring::Score,
            CustomGamemode::Relax | CustomGamemode::Autopilot => Scoring::Performance,
        }
    }
}
