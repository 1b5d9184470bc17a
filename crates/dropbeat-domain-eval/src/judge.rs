use dropbeat_domain_lanes::{HitOutcome, Marker, Meter};
use dropbeat_ports::types::{Lane, MarkerId, Status};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug)]
pub struct JudgeConfig {
    pub hit_fill: f32,
    pub miss_drain: f32,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            hit_fill: 5.0,
            miss_drain: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Judgement {
    Hit { lane: Lane, marker_id: MarkerId },
    /// Marker fell past the bottom without being hit.
    Missed { lane: Lane, marker_id: MarkerId },
    /// Lane pressed with nothing inside the window.
    WrongTiming { lane: Lane },
}

impl Judgement {
    pub fn status(&self) -> Status {
        match self {
            Judgement::Hit { .. } => Status::Good,
            Judgement::Missed { .. } => Status::Missed,
            Judgement::WrongTiming { .. } => Status::WrongTiming,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum JudgeEvent {
    Judged {
        judgement: Judgement,
        status: Status,
        fill: f32,
    },
    /// Emitted once per session, the first time the meter saturates.
    Won,
}

pub struct Judge {
    cfg: JudgeConfig,
    won: bool,
}

impl Judge {
    pub fn new(cfg: JudgeConfig) -> Self {
        Self { cfg, won: false }
    }

    pub fn reset(&mut self) {
        self.won = false;
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn on_input(&mut self, meter: &mut Meter, lane: Lane, outcome: HitOutcome) -> Vec<JudgeEvent> {
        match outcome {
            HitOutcome::Hit { markers } => self.on_hits(meter, &markers),
            HitOutcome::Miss => {
                let mut events = Vec::new();
                self.apply(meter, Judgement::WrongTiming { lane }, &mut events);
                events
            }
        }
    }

    pub fn on_hits(&mut self, meter: &mut Meter, markers: &[Marker]) -> Vec<JudgeEvent> {
        let mut events = Vec::with_capacity(markers.len() + 1);
        for marker in markers {
            let judgement = Judgement::Hit {
                lane: marker.lane,
                marker_id: marker.id,
            };
            self.apply(meter, judgement, &mut events);
        }
        events
    }

    pub fn on_overshoot(&mut self, meter: &mut Meter, markers: &[Marker]) -> Vec<JudgeEvent> {
        let mut events = Vec::with_capacity(markers.len());
        for marker in markers {
            let judgement = Judgement::Missed {
                lane: marker.lane,
                marker_id: marker.id,
            };
            self.apply(meter, judgement, &mut events);
        }
        events
    }

    fn apply(&mut self, meter: &mut Meter, judgement: Judgement, events: &mut Vec<JudgeEvent>) {
        let delta = match judgement {
            Judgement::Hit { .. } => self.cfg.hit_fill,
            Judgement::Missed { .. } | Judgement::WrongTiming { .. } => -self.cfg.miss_drain,
        };
        let full = meter.add(delta);
        events.push(JudgeEvent::Judged {
            judgement,
            status: judgement.status(),
            fill: meter.value(),
        });

        if full && !self.won && matches!(judgement, Judgement::Hit { .. }) {
            self.won = true;
            events.push(JudgeEvent::Won);
        }
    }
}

impl Default for Judge {
    fn default() -> Self {
        Self::new(JudgeConfig::default())
    }
}
