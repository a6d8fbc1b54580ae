//! menu_backend library exports

use clap::ValueEnum;
use log::LevelFilter;

pub mod core;

#[cfg(test)]
pub mod test_support;

pub use crate::core::action::{Action, ActionError, Effect, update};
pub use crate::core::event::{ChangeEvent, ItemChangeEvent, MoveEvent, UseEvent};
pub use crate::core::{Direction, ItemId, MenuBackend, MenuItem, ROOT_NAME};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
