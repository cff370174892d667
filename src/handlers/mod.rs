//! Handler implementations

pub mod console;
pub mod memory;

pub use console::{Console, ConsoleHandler, ConsoleStream, StdConsole};
pub use memory::{CapturedLine, MemoryHandler};

pub use crate::core::Handler;
