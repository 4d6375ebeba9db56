//! Quiz session: state, commands and the controller driving them.

mod command;
mod controller;
pub mod rules;
mod state;
mod timer;
mod view;

pub use command::Command;
pub use controller::Controller;
pub use state::{Countdown, Ending, GuardViolation, Phase, SessionState};
pub use timer::{TimerId, TimerRequest};
pub use view::{Panel, View};
