mod input;

use dropbeat_core::{AppCore, AppError, Outcome};
use dropbeat_infra_config_fs::FsConfig;
use dropbeat_ports::config::GameConfig;
use input::{parse_line, Input};
use log::{error, info, warn};
use parking_lot::Mutex;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn init_core(port: &FsConfig) -> Result<AppCore, AppError> {
    match AppCore::from_port(port) {
        Ok(core) => {
            info!("config loaded from {}", port.path().display());
            Ok(core)
        }
        Err(err) => {
            warn!("{err}; using built-in defaults");
            AppCore::new(GameConfig::default())
        }
    }
}

fn main() {
    env_logger::init();

    let port = match std::env::args().nth(1) {
        Some(path) => FsConfig::new(PathBuf::from(path)),
        None => FsConfig::default(),
    };
    let core = match init_core(&port) {
        Ok(core) => core,
        Err(err) => {
            error!("failed to initialize core: {err}");
            std::process::exit(1);
        }
    };
    let frame_interval = Duration::from_millis(core.config().frame_interval_ms);
    let core = Arc::new(Mutex::new(core));
    let quit = Arc::new(AtomicBool::new(false));

    let frame_loop = {
        let core = core.clone();
        let quit = quit.clone();
        std::thread::spawn(move || {
            let mut last = Instant::now();
            while !quit.load(Ordering::Relaxed) {
                let now = Instant::now();
                let events = {
                    let mut core = core.lock();
                    core.tick(now.duration_since(last));
                    core.drain_events()
                };
                last = now;

                for event in events {
                    match serde_json::to_string(&event) {
                        Ok(line) => println!("{line}"),
                        Err(err) => warn!("event not serializable: {err}"),
                    }
                }

                std::thread::sleep(frame_interval);
            }
        })
    };

    println!("keys: w a s d | start|resume|reset [easy|medium|hard] | pause | esc | exit | again | difficulty <name> | quit");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("stdin: {err}");
                break;
            }
        };
        match parse_line(&line) {
            Some(Input::Quit) => break,
            Some(Input::Command(command)) => {
                if core.lock().handle_command(command) == Outcome::Ignored {
                    info!("ignored: {}", line.trim());
                }
            }
            None => {}
        }
    }

    quit.store(true, Ordering::Relaxed);
    if frame_loop.join().is_err() {
        error!("frame loop panicked");
    }
}
