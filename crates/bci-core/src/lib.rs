pub mod calibration;
pub mod clock;
pub mod config;
pub mod constants;
pub mod controller;
pub mod dwell;
pub mod error;
pub mod focus;
pub mod layout;
pub mod progress;
pub mod state;
pub mod swarm;

pub use calibration::*;
pub use clock::*;
pub use config::*;
pub use controller::*;
pub use dwell::*;
pub use error::*;
pub use layout::*;
pub use progress::*;
pub use state::*;
pub use swarm::*;
