//! The world.

use crate::{
    cells::{Coord, State},
    config::Config,
    error::Error,
};
use std::mem;

/// Offsets of the eight grid-adjacent neighbors.
const NBHD: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The world.
///
/// The world owns two equally-sized cell buffers. One buffer holds the
/// current generation and is the readable source of truth; the other is
/// the write target of an in-progress advance. Advancing swaps the roles
/// of the buffers instead of copying them.
///
/// Both buffers are allocated once at construction and live for the
/// lifetime of the world. Cells are stored in row-major order:
/// `index = x + y * width`, with `x` varying fastest.
pub struct World {
    /// World configuration.
    config: Config,

    /// The current generation.
    current: Box<[State]>,

    /// The write target of the next advance.
    ///
    /// Becomes the current buffer after each advance.
    next: Box<[State]>,

    /// Number of generations advanced so far.
    generation: u64,

    /// Number of living cells in the current generation.
    population: usize,

    /// Invoked after every advance that ends with no living cells.
    on_extinct: Option<Box<dyn FnMut()>>,
}

impl World {
    /// Creates a new world from the configuration and an initial cell buffer.
    ///
    /// Each byte of `initial` is one cell in row-major order (`x` varies
    /// fastest): `0` is dead, any nonzero byte is alive.
    ///
    /// Returns [`Error::NonPositiveError`] if a dimension is not positive,
    /// and [`Error::SizeMismatch`] if the buffer length does not equal
    /// `width * height`.
    pub fn new(config: &Config, initial: &[u8]) -> Result<Self, Error> {
        if config.width <= 0 || config.height <= 0 {
            return Err(Error::NonPositiveError);
        }
        let area = config.area();
        if initial.len() != area {
            return Err(Error::SizeMismatch(area, initial.len()));
        }
        let current: Box<[State]> = initial.iter().map(|&byte| State::from_byte(byte)).collect();
        let population = current.iter().filter(|state| state.is_alive()).count();
        Ok(World {
            config: *config,
            current,
            next: vec![State::Dead; area].into_boxed_slice(),
            generation: 0,
            population,
            on_extinct: None,
        })
    }

    /// Registers a callback invoked after every advance that ends with no
    /// living cells.
    ///
    /// There is no latch: a world that stays dead invokes the callback
    /// again on each further advance.
    pub fn on_extinct<F: FnMut() + 'static>(mut self, f: F) -> Self {
        self.on_extinct = Some(Box::new(f));
        self
    }

    /// World configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of generations advanced so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of living cells in the current generation.
    pub fn population(&self) -> usize {
        self.population
    }

    /// Whether no cell in the current generation is alive.
    pub fn is_extinct(&self) -> bool {
        self.population == 0
    }

    /// The buffer index of in-range coordinates.
    fn coord_to_index(&self, (x, y): Coord) -> usize {
        (x + y * self.config.width) as usize
    }

    /// The coordinates of a buffer index.
    fn index_to_coord(&self, index: usize) -> Coord {
        let width = self.config.width as usize;
        ((index % width) as i32, (index / width) as i32)
    }

    /// Gets the state of a cell in the current generation.
    ///
    /// Returns `None` if the coordinates lie outside the grid.
    pub fn get_cell_state(&self, coord: Coord) -> Option<State> {
        if self.config.contains(coord) {
            Some(self.current[self.coord_to_index(coord)])
        } else {
            None
        }
    }

    /// Sets the state of a cell in the current generation.
    ///
    /// Returns [`Error::SetCellError`] if the coordinates lie outside
    /// the grid.
    pub fn set_cell_state(&mut self, coord: Coord, state: State) -> Result<(), Error> {
        if !self.config.contains(coord) {
            return Err(Error::SetCellError(coord));
        }
        let index = self.coord_to_index(coord);
        let old = mem::replace(&mut self.current[index], state);
        match (old, state) {
            (State::Dead, State::Alive) => self.population += 1,
            (State::Alive, State::Dead) => self.population -= 1,
            _ => (),
        }
        Ok(())
    }

    /// Counts the living cells among the eight grid-adjacent neighbors.
    ///
    /// Positions outside the grid do not count: the universe is
    /// edge-bounded, not toroidal.
    fn live_neighbor_count(&self, (x, y): Coord) -> usize {
        NBHD.iter()
            .filter(|&&(dx, dy)| self.get_cell_state((x + dx, y + dy)) == Some(State::Alive))
            .count()
    }

    /// The state of the cell at `coord` in the next generation,
    /// under the B3/S23 rule.
    fn next_cell_state(&self, coord: Coord) -> State {
        let state = self.current[self.coord_to_index(coord)];
        match (state, self.live_neighbor_count(coord)) {
            (State::Alive, 2) | (State::Alive, 3) | (State::Dead, 3) => State::Alive,
            _ => State::Dead,
        }
    }

    /// Advances the world by one generation.
    pub fn advance(&mut self) {
        self.advance_with(|_, _| ());
    }

    /// Advances the world by one generation, reporting every cell of the
    /// new generation to `visit` in row-major order (`x` varies fastest).
    ///
    /// The visitor is the renderer's only view of the new generation.
    /// It runs synchronously on the caller's thread and must not call
    /// back into this world.
    ///
    /// Rule evaluation reads only the old generation and writes only the
    /// spare buffer, so neighbor counts are never polluted by cells that
    /// have already been updated. The buffers swap roles afterwards; no
    /// cell data is copied or reallocated.
    pub fn advance_with<F>(&mut self, mut visit: F)
    where
        F: FnMut(Coord, State),
    {
        let mut next = mem::take(&mut self.next);
        let mut population = 0;
        for (index, slot) in next.iter_mut().enumerate() {
            let coord = self.index_to_coord(index);
            let state = self.next_cell_state(coord);
            *slot = state;
            if state.is_alive() {
                population += 1;
            }
            visit(coord, state);
        }
        self.next = mem::replace(&mut self.current, next);
        self.generation += 1;
        self.population = population;
        if population == 0 {
            if let Some(f) = &mut self.on_extinct {
                f();
            }
        }
    }

    /// Visits every cell of the current generation in row-major order.
    ///
    /// Renderers use this for the initial paint; later generations arrive
    /// through the visitor of [`advance_with`](Self::advance_with).
    pub fn for_each_cell<F>(&self, mut visit: F)
    where
        F: FnMut(Coord, State),
    {
        for (index, &state) in self.current.iter().enumerate() {
            visit(self.index_to_coord(index), state);
        }
    }

    /// Renders the current generation as text.
    ///
    /// One row of space-separated `D` / `A` labels per grid row,
    /// followed by a separator line of `-` labels.
    pub fn dump(&self) -> String {
        let mut str = String::new();
        for y in 0..self.config.height {
            for x in 0..self.config.width {
                if x > 0 {
                    str.push(' ');
                }
                str.push(self.current[self.coord_to_index((x, y))].label());
            }
            str.push('\n');
        }
        for x in 0..self.config.width {
            if x > 0 {
                str.push(' ');
            }
            str.push('-');
        }
        str.push('\n');
        str
    }
}
