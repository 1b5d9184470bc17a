use dropbeat_core::{AppCore, AppError, Command, Event, Outcome};
use dropbeat_domain_eval::Judgement;
use dropbeat_ports::{
    ConfigError, ConfigPort, Difficulty, DifficultyName, GameConfig, Lane, SessionState, Status,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

const SPAWN: Duration = Duration::from_millis(1000);

fn config() -> GameConfig {
    GameConfig {
        seed: Some(11),
        ..GameConfig::default()
    }
}

fn new_core() -> AppCore {
    AppCore::new(config()).unwrap()
}

fn start(core: &mut AppCore, difficulty: DifficultyName) -> Outcome {
    core.handle_command(Command::Start {
        difficulty: Some(difficulty),
    })
}

/// Frame ticks that carry no wall time, so the spawn cadence never fires.
fn frames(core: &mut AppCore, n: usize) {
    for _ in 0..n {
        core.tick(Duration::ZERO);
    }
}

fn marker_at(core: &AppCore, position: f32) -> Lane {
    core.markers()
        .find(|m| m.position == position)
        .map(|m| m.lane)
        .expect("marker at position")
}

fn miss_count(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| {
            matches!(
                e,
                Event::Judged {
                    judgement: Judgement::Missed { .. }
                }
            )
        })
        .count()
}

/// Spawns one marker, lets it reach 250 and hits it.
fn spawn_and_hit(core: &mut AppCore) {
    core.tick(SPAWN);
    frames(core, 125);
    let lane = marker_at(core, 250.0);
    assert_eq!(core.handle_command(Command::Input { lane }), Outcome::Applied);
}

fn win(core: &mut AppCore) {
    start(core, DifficultyName::Easy);
    while core.state() == SessionState::Running {
        spawn_and_hit(core);
    }
    assert_eq!(core.state(), SessionState::Won);
}

#[test]
fn new_core_is_idle() {
    let core = new_core();
    assert_eq!(core.state(), SessionState::Idle);
    assert_eq!(core.fill(), 0.0);
    assert_eq!(core.markers().count(), 0);
    assert_eq!(core.clock().active_handles(), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = config();
    cfg.presets.hard.fall_speed = -1.0;
    assert!(AppCore::new(cfg).is_err());
}

#[test]
fn spawn_count_follows_difficulty() {
    for (difficulty, expected) in [
        (DifficultyName::Easy, 1),
        (DifficultyName::Medium, 2),
        (DifficultyName::Hard, 2),
    ] {
        let mut core = new_core();
        start(&mut core, difficulty);
        core.tick(Duration::from_millis(999));
        assert_eq!(core.markers().count(), 0);
        core.tick(Duration::from_millis(1));
        assert_eq!(core.markers().count(), expected, "{difficulty}");
    }
}

#[test]
fn fall_speed_follows_difficulty() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Hard);
    core.tick(SPAWN);
    frames(&mut core, 10);
    assert!(core.markers().all(|m| m.position == 30.0));
}

#[test]
fn overshoot_removes_marker_with_one_miss() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Easy);
    core.tick(SPAWN);
    core.drain_events();

    frames(&mut core, 150);
    assert_eq!(core.markers().count(), 1);
    assert_eq!(miss_count(&core.drain_events()), 0);

    frames(&mut core, 1);
    assert_eq!(core.markers().count(), 0);
    assert_eq!(miss_count(&core.drain_events()), 1);
    assert_eq!(core.status(), Status::Missed);
    assert_eq!(core.fill(), 0.0);
}

#[test]
fn wrong_timing_press_drains() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Easy);
    spawn_and_hit(&mut core);
    spawn_and_hit(&mut core);
    assert_eq!(core.fill(), 10.0);

    core.handle_command(Command::Input { lane: Lane::W });
    assert_eq!(core.status(), Status::WrongTiming);
    assert_eq!(core.fill(), 5.0);
}

#[test]
fn pause_and_resume_do_not_duplicate_cadences() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Easy);
    for _ in 0..3 {
        assert_eq!(core.handle_command(Command::Pause), Outcome::Applied);
        assert_eq!(core.clock().active_handles(), 0);
        assert_eq!(
            core.handle_command(Command::Resume { difficulty: None }),
            Outcome::Applied
        );
        assert_eq!(core.clock().active_handles(), 2);
    }

    core.tick(SPAWN);
    assert_eq!(core.markers().count(), 1);
    core.tick(SPAWN);
    assert_eq!(core.markers().count(), 2);
}

#[test]
fn resume_applies_changed_difficulty() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Easy);
    core.handle_command(Command::Pause);
    core.handle_command(Command::Resume {
        difficulty: Some(DifficultyName::Hard),
    });

    assert_eq!(core.difficulty(), Difficulty::HARD);
    core.tick(SPAWN);
    assert_eq!(core.markers().count(), 2);
}

#[test]
fn picker_selection_is_used_on_resume() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Easy);
    assert_eq!(
        core.handle_command(Command::SelectDifficulty {
            difficulty: DifficultyName::Hard
        }),
        Outcome::Ignored
    );

    core.handle_command(Command::Pause);
    core.handle_command(Command::SelectDifficulty {
        difficulty: DifficultyName::Medium,
    });
    assert_eq!(core.difficulty(), Difficulty::EASY, "takes effect on resume");
    core.handle_command(Command::Resume { difficulty: None });
    assert_eq!(core.difficulty(), Difficulty::MEDIUM);
}

#[test]
fn paused_markers_freeze() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Easy);
    core.tick(SPAWN);
    frames(&mut core, 20);
    core.handle_command(Command::Pause);

    let before = core.snapshot().markers;
    core.tick(Duration::from_secs(10));
    frames(&mut core, 500);
    assert_eq!(core.snapshot().markers, before);
    assert_eq!(core.handle_command(Command::Input { lane: Lane::A }), Outcome::Ignored);
}

#[test]
fn reset_restarts_session() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Easy);
    spawn_and_hit(&mut core);
    core.tick(SPAWN);
    core.handle_command(Command::Pause);

    assert_eq!(
        core.handle_command(Command::Reset {
            difficulty: Some(DifficultyName::Medium)
        }),
        Outcome::Applied
    );
    assert_eq!(core.state(), SessionState::Running);
    assert_eq!(core.fill(), 0.0);
    assert_eq!(core.markers().count(), 0);
    assert_eq!(core.status(), Status::None);
    assert_eq!(core.difficulty(), Difficulty::MEDIUM);
    assert_eq!(core.clock().active_handles(), 2);
}

#[test]
fn reset_outside_pause_is_ignored() {
    let mut core = new_core();
    assert_eq!(
        core.handle_command(Command::Reset { difficulty: None }),
        Outcome::Ignored
    );
    start(&mut core, DifficultyName::Easy);
    assert_eq!(
        core.handle_command(Command::Reset { difficulty: None }),
        Outcome::Ignored
    );
}

#[test]
fn start_while_running_is_ignored() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Easy);
    core.tick(SPAWN);
    assert_eq!(start(&mut core, DifficultyName::Hard), Outcome::Ignored);
    assert_eq!(core.markers().count(), 1);
    assert_eq!(core.difficulty(), Difficulty::EASY);
}

#[test]
fn exit_from_every_state_returns_to_idle() {
    let mut running = new_core();
    start(&mut running, DifficultyName::Easy);
    spawn_and_hit(&mut running);
    running.tick(SPAWN);

    let mut paused = new_core();
    start(&mut paused, DifficultyName::Medium);
    spawn_and_hit(&mut paused);
    paused.tick(SPAWN);
    paused.handle_command(Command::Pause);

    let mut won = new_core();
    win(&mut won);

    for mut core in [new_core(), running, paused, won] {
        assert_eq!(core.handle_command(Command::Exit), Outcome::Applied);
        assert_eq!(core.state(), SessionState::Idle);
        assert_eq!(core.fill(), 0.0);
        assert_eq!(core.markers().count(), 0);
        assert_eq!(core.clock().active_handles(), 0);
        assert_eq!(core.status(), Status::None);

        core.tick(Duration::from_secs(5));
        assert_eq!(core.markers().count(), 0);
    }
}

#[test]
fn win_happens_once_and_stops_the_game() {
    let mut core = new_core();
    win(&mut core);

    assert_eq!(core.fill(), 100.0);
    assert_eq!(core.status(), Status::Won);
    assert_eq!(core.markers().count(), 0);
    assert!(!core.clock().is_running());

    let won_events = core
        .drain_events()
        .into_iter()
        .filter(|e| {
            matches!(
                e,
                Event::SessionStateUpdated {
                    state: SessionState::Won,
                    ..
                }
            )
        })
        .count();
    assert_eq!(won_events, 1);

    assert_eq!(core.handle_command(Command::Input { lane: Lane::S }), Outcome::Ignored);
    core.tick(SPAWN);
    assert_eq!(core.markers().count(), 0);
}

#[test]
fn celebration_runs_until_play_again() {
    let mut core = new_core();
    win(&mut core);
    assert!(core.snapshot().confetti.is_some());
    assert_eq!(core.clock().active_handles(), 1);
    core.drain_events();

    core.tick(Duration::from_millis(300));
    let events = core.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Celebration { confetti } if confetti == "🎉🎊🎉" || confetti == "🎊🎉🎊")));

    assert_eq!(core.handle_command(Command::PlayAgain), Outcome::Applied);
    assert_eq!(core.state(), SessionState::Idle);
    assert_eq!(core.snapshot().confetti, None);
    assert_eq!(core.clock().active_handles(), 0);
    assert_eq!(core.fill(), 0.0);
    assert_eq!(core.handle_command(Command::PlayAgain), Outcome::Ignored);
}

#[test]
fn start_from_won_rearms_clock() {
    let mut core = new_core();
    win(&mut core);
    assert_eq!(start(&mut core, DifficultyName::Medium), Outcome::Applied);
    assert_eq!(core.state(), SessionState::Running);
    assert_eq!(core.fill(), 0.0);
    assert_eq!(core.snapshot().confetti, None);
    assert_eq!(core.clock().active_handles(), 2);
}

#[test]
fn idle_pause_is_ignored_by_default() {
    let mut core = new_core();
    assert_eq!(core.handle_command(Command::Pause), Outcome::Ignored);
    assert_eq!(core.state(), SessionState::Idle);
}

#[test]
fn idle_pause_quirk_when_enabled() {
    let mut core = AppCore::new(GameConfig {
        allow_idle_pause: true,
        ..config()
    })
    .unwrap();

    assert_eq!(core.handle_command(Command::Pause), Outcome::Applied);
    assert_eq!(core.state(), SessionState::Paused);
    assert_eq!(core.clock().active_handles(), 0);

    assert_eq!(
        core.handle_command(Command::Resume {
            difficulty: Some(DifficultyName::Hard)
        }),
        Outcome::Applied
    );
    assert_eq!(core.state(), SessionState::Idle);
    assert_eq!(core.selected_difficulty(), DifficultyName::Hard);
    assert_eq!(core.clock().active_handles(), 0);
}

#[test]
fn raw_keys_map_to_commands() {
    let mut core = new_core();
    assert_eq!(
        core.handle_command(Command::Key { key: "w".to_string() }),
        Outcome::Ignored
    );

    start(&mut core, DifficultyName::Easy);
    core.tick(SPAWN);
    frames(&mut core, 130);
    let lane = marker_at(&core, 260.0);
    let key = lane.key().to_ascii_uppercase().to_string();
    assert_eq!(core.handle_command(Command::Key { key }), Outcome::Applied);
    assert_eq!(core.status(), Status::Good);

    assert_eq!(
        core.handle_command(Command::Key { key: "q".to_string() }),
        Outcome::Ignored
    );
    assert_eq!(
        core.handle_command(Command::Key { key: "Enter".to_string() }),
        Outcome::Ignored
    );
    assert_eq!(
        core.handle_command(Command::Key { key: "Escape".to_string() }),
        Outcome::Applied
    );
    assert_eq!(core.state(), SessionState::Paused);
    assert_eq!(
        core.handle_command(Command::Key { key: "Escape".to_string() }),
        Outcome::Ignored
    );
}

#[test]
fn hit_then_overshoot_scenario() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Easy);

    core.tick(SPAWN);
    assert_eq!(core.markers().count(), 1);
    frames(&mut core, 125);
    let lane = marker_at(&core, 250.0);

    core.handle_command(Command::Input { lane });
    assert_eq!(core.fill(), 5.0);
    assert_eq!(core.status(), Status::Good);
    assert_eq!(core.snapshot().message, "Good!");
    assert_eq!(core.markers().count(), 0);

    core.tick(SPAWN);
    assert_eq!(core.markers().count(), 1);
    frames(&mut core, 151);
    assert_eq!(core.markers().count(), 0);
    assert_eq!(core.fill(), 0.0);
    assert_eq!(core.status(), Status::Missed);
    assert_eq!(core.snapshot().message, "Missed!");
}

#[test]
fn snapshot_reports_frame_state() {
    let mut core = new_core();
    start(&mut core, DifficultyName::Medium);
    core.tick(SPAWN);
    frames(&mut core, 3);

    let snapshot = core.snapshot();
    assert_eq!(snapshot.state, SessionState::Running);
    assert_eq!(snapshot.difficulty, DifficultyName::Medium);
    assert_eq!(snapshot.markers.len(), 2);
    assert!(snapshot.markers.iter().all(|m| m.position == 6.0));
    assert_eq!(snapshot.fill, 0.0);
    assert_eq!(snapshot.confetti, None);
}

struct StaticConfig(Result<GameConfig, String>);

impl ConfigPort for StaticConfig {
    fn load_config(&self) -> Result<GameConfig, ConfigError> {
        self.0.clone().map_err(ConfigError::Parse)
    }
}

#[test]
fn from_port_uses_loaded_config() {
    let port = StaticConfig(Ok(GameConfig {
        default_difficulty: DifficultyName::Hard,
        frame_interval_ms: 20,
        ..config()
    }));
    let core = AppCore::from_port(&port).unwrap();

    assert_eq!(core.selected_difficulty(), DifficultyName::Hard);
    assert_eq!(core.config().frame_interval_ms, 20);
    assert_eq!(core.state(), SessionState::Idle);
}

#[test]
fn from_port_surfaces_load_and_validation_errors() {
    let broken = StaticConfig(Err("unexpected token".to_string()));
    assert!(matches!(
        AppCore::from_port(&broken),
        Err(AppError::Config(ConfigError::Parse(_)))
    ));

    let invalid = StaticConfig(Ok(GameConfig {
        spawn_interval_ms: 0,
        ..config()
    }));
    assert!(matches!(
        AppCore::from_port(&invalid),
        Err(AppError::Config(ConfigError::Invalid(_)))
    ));
}
