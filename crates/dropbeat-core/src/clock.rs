use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    Spawn,
    Frame,
    Celebration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockTicks {
    pub frames: u32,
    pub spawns: u32,
    pub celebrations: u32,
}

#[derive(Clone, Copy, Debug)]
struct IntervalTimer {
    handle: TimerHandle,
    period: Duration,
    elapsed: Duration,
}

impl IntervalTimer {
    fn drain(&mut self, elapsed: Duration) -> u32 {
        // A zero period would never drain.
        if self.period.is_zero() {
            return 0;
        }
        self.elapsed += elapsed;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// Virtual-time clock. Each cadence owns at most one live handle; arming a
/// cadence always cancels the previous handle first.
#[derive(Clone, Debug)]
pub struct TimingClock {
    spawn_period: Duration,
    celebration_period: Duration,
    next_handle: u64,
    spawn: Option<IntervalTimer>,
    frame: Option<TimerHandle>,
    celebration: Option<IntervalTimer>,
}

impl TimingClock {
    pub fn new(spawn_period: Duration, celebration_period: Duration) -> Self {
        Self {
            spawn_period,
            celebration_period,
            next_handle: 1,
            spawn: None,
            frame: None,
            celebration: None,
        }
    }

    /// Arms the spawn interval and the frame trigger together.
    pub fn start(&mut self) -> (TimerHandle, TimerHandle) {
        self.stop();
        let spawn = self.next_handle();
        let frame = self.next_handle();
        self.spawn = Some(IntervalTimer {
            handle: spawn,
            period: self.spawn_period,
            elapsed: Duration::ZERO,
        });
        self.frame = Some(frame);
        (spawn, frame)
    }

    pub fn stop(&mut self) {
        self.spawn = None;
        self.frame = None;
    }

    pub fn start_celebration(&mut self) -> TimerHandle {
        let handle = self.next_handle();
        self.celebration = Some(IntervalTimer {
            handle,
            period: self.celebration_period,
            elapsed: Duration::ZERO,
        });
        handle
    }

    pub fn stop_celebration(&mut self) {
        self.celebration = None;
    }

    pub fn stop_all(&mut self) {
        self.stop();
        self.stop_celebration();
    }

    pub fn is_running(&self) -> bool {
        self.spawn.is_some() && self.frame.is_some()
    }

    pub fn handle(&self, cadence: Cadence) -> Option<TimerHandle> {
        match cadence {
            Cadence::Spawn => self.spawn.map(|t| t.handle),
            Cadence::Frame => self.frame,
            Cadence::Celebration => self.celebration.map(|t| t.handle),
        }
    }

    pub fn active_handles(&self) -> usize {
        [Cadence::Spawn, Cadence::Frame, Cadence::Celebration]
            .into_iter()
            .filter(|cadence| self.handle(*cadence).is_some())
            .count()
    }

    /// One host frame: `elapsed` is the wall time since the previous one.
    pub fn advance(&mut self, elapsed: Duration) -> ClockTicks {
        ClockTicks {
            frames: u32::from(self.frame.is_some()),
            spawns: self.spawn.as_mut().map_or(0, |t| t.drain(elapsed)),
            celebrations: self.celebration.as_mut().map_or(0, |t| t.drain(elapsed)),
        }
    }

    fn next_handle(&mut self) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}
