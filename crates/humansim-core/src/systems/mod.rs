//! Systems - logic that operates on components

mod agent;
mod behavior;
mod foraging;
mod movement;
mod needs;
mod reproduction;
mod targeting;

pub use agent::*;
pub use behavior::*;
pub use foraging::*;
pub use movement::*;
pub use needs::*;
pub use reproduction::*;
pub use targeting::*;
