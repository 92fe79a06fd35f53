//! Adapter implementations for application ports.

mod system_clock;
mod terminal_quick_input;

pub use system_clock::SystemClock;
pub use terminal_quick_input::TerminalQuickInput;
