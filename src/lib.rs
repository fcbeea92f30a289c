//! Headless front-end for the bci-swarm core: scripted pointer input,
//! keyboard command mapping and the tick loop.

pub mod events;
pub mod frame;

pub use events::keyboard::{apply_command, command_for_key, Command};
pub use events::pointer::{target_tour, PointerScript};
pub use frame::{run_until, FrameContext, RunStats};
