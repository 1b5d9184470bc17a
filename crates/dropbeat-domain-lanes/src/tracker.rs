use crate::model::{HitOutcome, HitWindow, Marker};
use dropbeat_ports::types::{Lane, MarkerId};
use log::debug;
use rand::Rng;

pub const DEFAULT_SWEEP_THRESHOLD: f32 = 300.0;

#[derive(Clone, Copy, Debug)]
pub struct TrackerConfig {
    pub sweep_threshold: f32,
    pub window: HitWindow,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
            window: HitWindow::default(),
        }
    }
}

/// Falling markers, one bucket per lane in spawn order.
#[derive(Clone, Debug)]
pub struct LaneTracker {
    cfg: TrackerConfig,
    lanes: [Vec<Marker>; 4],
    next_id: MarkerId,
}

impl LaneTracker {
    pub fn new(cfg: TrackerConfig) -> Self {
        Self {
            cfg,
            lanes: Default::default(),
            next_id: 1,
        }
    }

    pub fn spawn<R: Rng + ?Sized>(&mut self, count: u32, rng: &mut R) -> Vec<Marker> {
        let mut spawned = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let lane = Lane::ALL[rng.random_range(0..Lane::ALL.len())];
            let marker = Marker {
                id: self.next_id,
                lane,
                position: 0.0,
            };
            self.next_id += 1;
            self.lanes[lane.index()].push(marker);
            spawned.push(marker);
        }
        spawned
    }

    pub fn advance(&mut self, delta: f32) {
        for marker in self.lanes.iter_mut().flatten() {
            marker.position += delta;
        }
    }

    /// Removes every marker past the threshold; each one is an automatic miss.
    pub fn sweep(&mut self) -> Vec<Marker> {
        let threshold = self.cfg.sweep_threshold;
        let mut missed = Vec::new();
        for lane in self.lanes.iter_mut() {
            lane.retain(|marker| {
                if marker.position > threshold {
                    missed.push(*marker);
                    false
                } else {
                    true
                }
            });
        }
        if !missed.is_empty() {
            debug!("swept {} marker(s) past {}", missed.len(), threshold);
        }
        missed
    }

    /// Consumes all markers of `lane` inside the hit window.
    pub fn hit_test(&mut self, lane: Lane) -> HitOutcome {
        let window = self.cfg.window;
        let bucket = &mut self.lanes[lane.index()];
        let mut matched = Vec::new();
        bucket.retain(|marker| {
            if window.contains(marker.position) {
                matched.push(*marker);
                false
            } else {
                true
            }
        });

        if matched.is_empty() {
            HitOutcome::Miss
        } else {
            HitOutcome::Hit { markers: matched }
        }
    }

    pub fn clear(&mut self) {
        for lane in self.lanes.iter_mut() {
            lane.clear();
        }
    }

    pub fn lane_markers(&self, lane: Lane) -> &[Marker] {
        &self.lanes[lane.index()]
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.lanes.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(Vec::is_empty)
    }
}

impl Default for LaneTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
