//! # Actions
//!
//! Everything a host can ask the menu to do becomes an `Action`.
//! A button press? That's `Action::Down`. A mnemonic key? That's
//! `Action::UseShortkey('F')`.
//!
//! `update()` applies one action to the backend and tells the host whether
//! to keep going. Hosts that read text (the `menu-shell` binary, test
//! scripts) parse one action per line with `str::parse`.
//!
//! ```text
//! "down"  →  Action::Down  →  update(backend, action)  →  Effect::Continue
//! ```

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::core::backend::MenuBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Back,
    Exit,
    /// Use the current item.
    Use,
    UseShortkey(char),
    /// Jump to the first item with this name.
    Select(String),
    Level(u8),
    RelativeLevel(i32),
    /// Add to the current item's value.
    Increment(i32),
    /// Subtract from the current item's value.
    Decrement(i32),
    Quit,
}

/// What the host should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidArgument { command: &'static str, value: String },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Empty => write!(f, "empty command"),
            ActionError::Unknown(cmd) => write!(f, "unknown command: {cmd}"),
            ActionError::MissingArgument(cmd) => write!(f, "{cmd}: missing argument"),
            ActionError::InvalidArgument { command, value } => {
                write!(f, "{command}: invalid argument '{value}'")
            }
        }
    }
}

impl std::error::Error for ActionError {}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        match command.to_ascii_lowercase().as_str() {
            "" => Err(ActionError::Empty),
            "up" | "k" => Ok(Action::Up),
            "down" | "j" => Ok(Action::Down),
            "left" | "h" => Ok(Action::Left),
            "right" | "l" => Ok(Action::Right),
            "back" | "b" => Ok(Action::Back),
            "exit" | "x" => Ok(Action::Exit),
            "use" | "u" => match arg {
                None => Ok(Action::Use),
                Some(key) => single_char(key).map(Action::UseShortkey),
            },
            "select" | "s" => arg
                .map(|name| Action::Select(name.to_string()))
                .ok_or(ActionError::MissingArgument("select")),
            "level" => parse_arg::<u8>("level", arg).map(Action::Level),
            "levels" => parse_arg::<i32>("levels", arg).map(Action::RelativeLevel),
            "inc" | "+" => parse_step("inc", arg).map(Action::Increment),
            "dec" | "-" => parse_step("dec", arg).map(Action::Decrement),
            "quit" | "q" => Ok(Action::Quit),
            _ => Err(ActionError::Unknown(command.to_string())),
        }
    }
}

fn single_char(arg: &str) -> Result<char, ActionError> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ActionError::InvalidArgument {
            command: "use",
            value: arg.to_string(),
        }),
    }
}

fn parse_arg<T: FromStr>(command: &'static str, arg: Option<&str>) -> Result<T, ActionError> {
    let arg = arg.ok_or(ActionError::MissingArgument(command))?;
    arg.parse().map_err(|_| ActionError::InvalidArgument {
        command,
        value: arg.to_string(),
    })
}

/// Steps default to 1 when omitted.
fn parse_step(command: &'static str, arg: Option<&str>) -> Result<i32, ActionError> {
    match arg {
        None => Ok(1),
        Some(_) => parse_arg(command, arg),
    }
}

/// Applies `action` to the backend.
///
/// Selecting a name that does not exist is a no-op, like every other miss.
pub fn update(backend: &mut MenuBackend, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    match action {
        Action::Up => backend.move_up(),
        Action::Down => backend.move_down(),
        Action::Left => backend.move_left(),
        Action::Right => backend.move_right(),
        Action::Back => backend.move_back(),
        Action::Exit => backend.move_exit(),
        Action::Use => backend.use_current(),
        Action::UseShortkey(key) => backend.use_shortkey(key),
        Action::Select(name) => {
            if let Some(id) = backend.find(&name) {
                backend.select(id);
            }
        }
        Action::Level(level) => backend.move_to_level(level),
        Action::RelativeLevel(delta) => backend.move_relative_levels(delta),
        Action::Increment(step) => {
            backend.increment_by(backend.current(), step);
        }
        Action::Decrement(step) => {
            backend.decrement_by(backend.current(), step);
        }
        Action::Quit => return Effect::Quit,
    }
    Effect::Continue
}
