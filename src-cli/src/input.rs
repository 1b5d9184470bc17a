use dropbeat_core::Command;
use dropbeat_ports::types::DifficultyName;

#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// One stdin line. Unknown difficulty names fall back to easy; unknown words
/// are forwarded as raw keys and ignored by the core.
pub fn parse_line(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let difficulty = words.next().map(DifficultyName::parse_or_easy);

    let command = match head.to_ascii_lowercase().as_str() {
        "quit" | "q!" => return Some(Input::Quit),
        "start" => Command::Start { difficulty },
        "pause" => Command::Pause,
        "resume" => Command::Resume { difficulty },
        "reset" => Command::Reset { difficulty },
        "exit" => Command::Exit,
        "again" => Command::PlayAgain,
        "difficulty" => Command::SelectDifficulty {
            difficulty: difficulty.unwrap_or_default(),
        },
        "esc" | "escape" => Command::Key {
            key: "Escape".to_string(),
        },
        _ => Command::Key {
            key: head.to_string(),
        },
    };
    Some(Input::Command(command))
}
