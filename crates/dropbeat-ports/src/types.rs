use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub type MarkerId = u64; // per-session, monotonic

pub const FILL_MAX: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    W,
    A,
    S,
    D,
}

impl Lane {
    pub const ALL: [Lane; 4] = [Lane::W, Lane::A, Lane::S, Lane::D];

    /// Case-insensitive key mapping. `None` means "not a lane".
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Lane::W),
            'a' => Some(Lane::A),
            's' => Some(Lane::S),
            'd' => Some(Lane::D),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Lane::W => 'w',
            Lane::A => 'a',
            Lane::S => 's',
            Lane::D => 'd',
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty: {0}")]
pub struct ParseDifficultyError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DifficultyName {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl DifficultyName {
    pub const ALL: [DifficultyName; 3] = [
        DifficultyName::Easy,
        DifficultyName::Medium,
        DifficultyName::Hard,
    ];

    /// Lenient parse: anything unrecognized is `Easy`.
    pub fn parse_or_easy(value: &str) -> Self {
        value.parse().unwrap_or(DifficultyName::Easy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyName::Easy => "easy",
            DifficultyName::Medium => "medium",
            DifficultyName::Hard => "hard",
        }
    }
}

impl FromStr for DifficultyName {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyName::Easy),
            "medium" => Ok(DifficultyName::Medium),
            "hard" => Ok(DifficultyName::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl From<String> for DifficultyName {
    fn from(value: String) -> Self {
        Self::parse_or_easy(&value)
    }
}

impl fmt::Display for DifficultyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub spawn_count: u32,
    pub fall_speed: f32,
}

impl Difficulty {
    pub const EASY: Difficulty = Difficulty {
        spawn_count: 1,
        fall_speed: 2.0,
    };
    pub const MEDIUM: Difficulty = Difficulty {
        spawn_count: 2,
        fall_speed: 2.0,
    };
    pub const HARD: Difficulty = Difficulty {
        spawn_count: 2,
        fall_speed: 3.0,
    };

    pub fn preset(name: DifficultyName) -> Self {
        match name {
            DifficultyName::Easy => Self::EASY,
            DifficultyName::Medium => Self::MEDIUM,
            DifficultyName::Hard => Self::HARD,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.spawn_count >= 1 && self.fall_speed.is_finite() && self.fall_speed > 0.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::EASY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    None,
    Good,
    Missed,
    WrongTiming,
    Won,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Status::None => "",
            Status::Good => "Good!",
            Status::Missed => "Missed!",
            Status::WrongTiming => "Wrong timing!",
            Status::Won => "Bucket Full! You Win!",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
