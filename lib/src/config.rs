//! World configuration.

use crate::{cells::Coord, error::Error, world::World};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World configuration.
///
/// The world will be generated from this configuration.
/// The dimensions are fixed for the lifetime of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Width.
    pub width: i32,

    /// Height.
    pub height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 16,
            height: 16,
        }
    }
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: i32, height: i32) -> Self {
        Config { width, height }
    }

    /// Sets the width.
    pub fn set_width(mut self, width: i32) -> Self {
        self.width = width;
        self
    }

    /// Sets the height.
    pub fn set_height(mut self, height: i32) -> Self {
        self.height = height;
        self
    }

    /// Number of cells in the grid.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the coordinates lie inside the grid.
    pub fn contains(&self, (x, y): Coord) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Creates a new world from the configuration and an initial cell buffer.
    ///
    /// Each byte of `initial` is one cell in row-major order (`x` varies
    /// fastest): `0` is dead, any nonzero byte is alive.
    ///
    /// Returns an error if the dimensions are not positive, or if the
    /// buffer length does not equal `width * height`.
    pub fn world(&self, initial: &[u8]) -> Result<World, Error> {
        World::new(self, initial)
    }
}
