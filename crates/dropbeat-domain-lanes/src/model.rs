use dropbeat_ports::types::{Lane, MarkerId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub lane: Lane,
    /// Distance fallen since spawn.
    pub position: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitWindow {
    pub low: f32,
    pub high: f32,
}

impl HitWindow {
    pub fn contains(&self, position: f32) -> bool {
        position >= self.low && position <= self.high
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self {
            low: 240.0,
            high: 280.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HitOutcome {
    /// Every marker of the lane inside the window, already removed.
    Hit { markers: Vec<Marker> },
    Miss,
}

impl HitOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, HitOutcome::Hit { .. })
    }
}
