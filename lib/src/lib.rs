mod cells;
mod config;
mod error;
mod world;

pub use cells::{Coord, State};
pub use config::Config;
pub use error::Error;
pub use world::World;
