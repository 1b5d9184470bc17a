use crate::clock::TimingClock;
use crate::ipc::{Command, Event, FrameSnapshot, Outcome};
use dropbeat_domain_eval::{Judge, JudgeConfig, JudgeEvent};
use dropbeat_domain_lanes::{HitWindow, LaneTracker, Marker, Meter, TrackerConfig};
use dropbeat_ports::config::{ConfigError, ConfigPort, GameConfig};
use dropbeat_ports::types::{Difficulty, DifficultyName, Lane, SessionState, Status};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::Duration;

const CONFETTI: [&str; 2] = ["🎉🎊🎉", "🎊🎉🎊"];

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

pub struct AppCore {
    config: GameConfig,
    state: SessionState,
    /// False for a pause opened from Idle: resume then returns to Idle.
    session_active: bool,
    selected: DifficultyName,
    difficulty_name: DifficultyName,
    difficulty: Difficulty,
    clock: TimingClock,
    tracker: LaneTracker,
    judge: Judge,
    meter: Meter,
    status: Status,
    confetti: Option<&'static str>,
    rng: StdRng,
    events: VecDeque<Event>,
}

impl AppCore {
    pub fn new(config: GameConfig) -> Result<Self, AppError> {
        config.validate()?;

        let clock = TimingClock::new(
            Duration::from_millis(config.spawn_interval_ms),
            Duration::from_millis(config.celebration_interval_ms),
        );
        let tracker = LaneTracker::new(TrackerConfig {
            sweep_threshold: config.sweep_threshold,
            window: HitWindow {
                low: config.hit_window_low,
                high: config.hit_window_high,
            },
        });
        let judge = Judge::new(JudgeConfig {
            hit_fill: config.hit_fill,
            miss_drain: config.miss_drain,
        });
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let selected = config.default_difficulty;

        Ok(Self {
            state: SessionState::Idle,
            session_active: false,
            selected,
            difficulty_name: selected,
            difficulty: config.difficulty(selected),
            clock,
            tracker,
            judge,
            meter: Meter::new(),
            status: Status::None,
            confetti: None,
            rng,
            events: VecDeque::new(),
            config,
        })
    }

    pub fn from_port(port: &dyn ConfigPort) -> Result<Self, AppError> {
        Self::new(port.load_config()?)
    }

    pub fn handle_command(&mut self, cmd: Command) -> Outcome {
        let outcome = match cmd {
            Command::Start { difficulty } => self.start(difficulty),
            Command::Pause => self.pause(),
            Command::Resume { difficulty } => self.resume(difficulty),
            Command::Reset { difficulty } => self.reset(difficulty),
            Command::Exit => self.exit(),
            Command::PlayAgain => self.play_again(),
            Command::SelectDifficulty { difficulty } => self.select_difficulty(difficulty),
            Command::Input { lane } => self.input(lane),
            Command::Key { ref key } => self.key(key),
        };
        if outcome == Outcome::Ignored {
            debug!("ignored {:?} in {:?}", cmd, self.state);
        }
        outcome
    }

    /// One host frame.
    pub fn tick(&mut self, elapsed: Duration) {
        let ticks = self.clock.advance(elapsed);

        if self.state == SessionState::Running {
            let frames = if self.tracker.is_empty() { 0 } else { ticks.frames };
            for _ in 0..frames {
                self.tracker.advance(self.difficulty.fall_speed);
                let missed = self.tracker.sweep();
                if !missed.is_empty() {
                    let judge_events = self.judge.on_overshoot(&mut self.meter, &missed);
                    self.handle_judge_events(judge_events);
                }
            }
            for _ in 0..ticks.spawns {
                let markers = self
                    .tracker
                    .spawn(self.difficulty.spawn_count, &mut self.rng);
                self.events.push_back(Event::MarkersSpawned { markers });
            }
        }

        if self.state == SessionState::Won {
            for _ in 0..ticks.celebrations {
                self.toggle_confetti();
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let mut markers = Vec::with_capacity(self.tracker.len());
        markers.extend(self.tracker.markers().copied());
        FrameSnapshot {
            state: self.state,
            difficulty: self.difficulty_name,
            selected_difficulty: self.selected,
            fill: self.meter.value(),
            status: self.status,
            message: self.status.message().to_string(),
            markers,
            confetti: self.confetti.map(str::to_string),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn fill(&self) -> f32 {
        self.meter.value()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn selected_difficulty(&self) -> DifficultyName {
        self.selected
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.tracker.markers()
    }

    pub fn clock(&self) -> &TimingClock {
        &self.clock
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn start(&mut self, difficulty: Option<DifficultyName>) -> Outcome {
        if self.state == SessionState::Running {
            return Outcome::Ignored;
        }
        self.begin_session(difficulty);
        Outcome::Applied
    }

    fn pause(&mut self) -> Outcome {
        match self.state {
            SessionState::Running => {
                self.clock.stop();
                self.set_state(SessionState::Paused);
                Outcome::Applied
            }
            SessionState::Idle if self.config.allow_idle_pause => {
                self.clock.stop();
                self.session_active = false;
                self.set_state(SessionState::Paused);
                Outcome::Applied
            }
            _ => Outcome::Ignored,
        }
    }

    fn resume(&mut self, difficulty: Option<DifficultyName>) -> Outcome {
        if self.state != SessionState::Paused {
            return Outcome::Ignored;
        }
        let name = self.resolve_difficulty(difficulty);
        if self.session_active {
            self.apply_difficulty(name);
            self.clock.start();
            self.set_state(SessionState::Running);
        } else {
            self.set_state(SessionState::Idle);
        }
        Outcome::Applied
    }

    fn reset(&mut self, difficulty: Option<DifficultyName>) -> Outcome {
        if self.state != SessionState::Paused {
            return Outcome::Ignored;
        }
        self.begin_session(difficulty);
        Outcome::Applied
    }

    fn exit(&mut self) -> Outcome {
        self.teardown();
        self.set_state(SessionState::Idle);
        Outcome::Applied
    }

    fn play_again(&mut self) -> Outcome {
        if self.state != SessionState::Won {
            return Outcome::Ignored;
        }
        self.teardown();
        self.set_state(SessionState::Idle);
        Outcome::Applied
    }

    fn select_difficulty(&mut self, difficulty: DifficultyName) -> Outcome {
        if self.state == SessionState::Running {
            return Outcome::Ignored;
        }
        self.selected = difficulty;
        Outcome::Applied
    }

    fn input(&mut self, lane: Lane) -> Outcome {
        if self.state != SessionState::Running {
            return Outcome::Ignored;
        }
        let outcome = self.tracker.hit_test(lane);
        let judge_events = self.judge.on_input(&mut self.meter, lane, outcome);
        self.handle_judge_events(judge_events);
        Outcome::Applied
    }

    fn key(&mut self, key: &str) -> Outcome {
        if key.eq_ignore_ascii_case("escape") || key.eq_ignore_ascii_case("esc") {
            if self.state == SessionState::Paused {
                return Outcome::Ignored;
            }
            return self.pause();
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => match Lane::from_key(c) {
                Some(lane) => self.input(lane),
                None => Outcome::Ignored,
            },
            _ => Outcome::Ignored,
        }
    }

    fn begin_session(&mut self, difficulty: Option<DifficultyName>) {
        let name = self.resolve_difficulty(difficulty);
        self.clock.stop_all();
        self.tracker.clear();
        self.meter.reset();
        self.judge.reset();
        self.confetti = None;
        self.apply_difficulty(name);
        self.session_active = true;
        self.clock.start();
        self.set_status(Status::None);
        self.emit_meter();
        self.set_state(SessionState::Running);
    }

    fn on_meter_full(&mut self) {
        info!("bucket full, session won");
        self.clock.stop();
        self.tracker.clear();
        self.session_active = false;
        self.set_status(Status::Won);
        self.clock.start_celebration();
        self.toggle_confetti();
        self.set_state(SessionState::Won);
    }

    fn teardown(&mut self) {
        self.clock.stop_all();
        self.tracker.clear();
        self.meter.reset();
        self.judge.reset();
        self.session_active = false;
        self.confetti = None;
        self.set_status(Status::None);
        self.emit_meter();
    }

    fn handle_judge_events(&mut self, judge_events: Vec<JudgeEvent>) {
        let mut won = false;
        for event in judge_events {
            match event {
                JudgeEvent::Judged {
                    judgement,
                    status,
                    fill,
                } => {
                    debug!("{:?} -> fill {}", judgement, fill);
                    self.events.push_back(Event::Judged { judgement });
                    self.events.push_back(Event::MeterUpdated { fill });
                    self.set_status(status);
                }
                JudgeEvent::Won => won = true,
            }
        }
        if won && self.state == SessionState::Running {
            self.on_meter_full();
        }
    }

    fn resolve_difficulty(&mut self, difficulty: Option<DifficultyName>) -> DifficultyName {
        let name = difficulty.unwrap_or(self.selected);
        self.selected = name;
        name
    }

    fn apply_difficulty(&mut self, name: DifficultyName) {
        self.difficulty_name = name;
        self.difficulty = self.config.difficulty(name);
    }

    fn toggle_confetti(&mut self) {
        let frame = if self.rng.random_bool(0.5) {
            CONFETTI[0]
        } else {
            CONFETTI[1]
        };
        self.confetti = Some(frame);
        self.events.push_back(Event::Celebration {
            confetti: frame.to_string(),
        });
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        self.events.push_back(Event::StatusUpdated {
            status,
            message: status.message().to_string(),
        });
    }

    fn emit_meter(&mut self) {
        self.events.push_back(Event::MeterUpdated {
            fill: self.meter.value(),
        });
    }

    fn set_state(&mut self, state: SessionState) {
        if self.state != state {
            info!("session {:?} -> {:?} ({})", self.state, state, self.difficulty_name);
        }
        self.state = state;
        self.events.push_back(Event::SessionStateUpdated {
            state,
            difficulty: self.difficulty_name,
        });
    }
}
