//! 交互式命令行模块

mod commands;
mod completer;
mod printer;

pub use commands::{CommandResult, Session};
pub use completer::{PatrolCompleter, COMMANDS};
pub use printer::{PrintMode, Printer};
