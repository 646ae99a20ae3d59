//! Command interpreter

pub mod command;
pub mod interpreter;
pub mod tokenizer;

pub use command::{Command, CommandError};
pub use interpreter::{Flow, Interpreter};
