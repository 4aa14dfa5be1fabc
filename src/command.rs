use gridsnake::game::Direction;
use log::warn;
use std::io::BufRead;
use std::sync::mpsc::Sender;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Turn(Direction),
}

impl Command {
    /// Interpret one line of player input.  Surrounding whitespace and case
    /// are ignored.
    pub(crate) fn from_line(line: &str) -> Option<Command> {
        match line.trim().to_ascii_lowercase().as_str() {
            "w" | "k" | "up" => Some(Command::Turn(Direction::Up)),
            "s" | "j" | "down" => Some(Command::Turn(Direction::Down)),
            "a" | "h" | "left" => Some(Command::Turn(Direction::Left)),
            "d" | "l" | "right" => Some(Command::Turn(Direction::Right)),
            _ => None,
        }
    }
}

/// Read commands from `reader` line by line and send the requested directions
/// down `sender` until the input ends or the receiver hangs up
pub(crate) fn forward_commands<B: BufRead>(reader: B, sender: &Sender<Direction>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read input: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match Command::from_line(&line) {
            Some(Command::Turn(direction)) => {
                if sender.send(direction).is_err() {
                    break;
                }
            }
            None => warn!("Unrecognized command: {line:?}"),
        }
    }
}
