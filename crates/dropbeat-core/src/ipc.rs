use dropbeat_domain_eval::Judgement;
use dropbeat_domain_lanes::Marker;
use dropbeat_ports::types::{DifficultyName, Lane, SessionState, Status};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    /// `None` uses the difficulty currently selected in the picker.
    Start { difficulty: Option<DifficultyName> },
    Pause,
    Resume { difficulty: Option<DifficultyName> },
    Reset { difficulty: Option<DifficultyName> },
    Exit,
    PlayAgain,
    SelectDifficulty { difficulty: DifficultyName },
    Input { lane: Lane },
    /// Raw key press: lane keys, `Escape`, anything else is ignored.
    Key { key: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    SessionStateUpdated {
        state: SessionState,
        difficulty: DifficultyName,
    },
    MeterUpdated { fill: f32 },
    StatusUpdated { status: Status, message: String },
    Judged { judgement: Judgement },
    MarkersSpawned { markers: Vec<Marker> },
    Celebration { confetti: String },
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub state: SessionState,
    pub difficulty: DifficultyName,
    pub selected_difficulty: DifficultyName,
    pub fill: f32,
    pub status: Status,
    pub message: String,
    pub markers: Vec<Marker>,
    pub confetti: Option<String>,
}
