use lifebox_lib::{Config, Coord, Error, State, World};
use pretty_assertions::assert_eq;
use std::{cell::Cell, rc::Rc};

/// Builds a world of the given size with the listed cells alive.
fn world_with(width: i32, height: i32, alive: &[Coord]) -> Result<World, Error> {
    let config = Config::new(width, height);
    let mut world = config.world(&vec![0; config.area()])?;
    for &coord in alive {
        world.set_cell_state(coord, State::Alive)?;
    }
    Ok(world)
}

/// The set of living cells, in row-major order.
fn live_cells(world: &World) -> Vec<Coord> {
    let mut cells = Vec::new();
    world.for_each_cell(|coord, state| {
        if state.is_alive() {
            cells.push(coord);
        }
    });
    cells
}

#[test]
fn block_is_a_still_life() -> Result<(), Error> {
    let mut world = world_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)])?;
    let before = world.dump();
    world.advance();
    assert_eq!(world.dump(), before);
    assert_eq!(world.population(), 4);
    Ok(())
}

#[test]
fn blinker_oscillates_with_period_two() -> Result<(), Error> {
    let mut world = world_with(5, 5, &[(1, 2), (2, 2), (3, 2)])?;
    world.advance();
    assert_eq!(live_cells(&world), vec![(2, 1), (2, 2), (2, 3)]);
    world.advance();
    assert_eq!(live_cells(&world), vec![(1, 2), (2, 2), (3, 2)]);
    Ok(())
}

#[test]
fn dead_cell_with_three_neighbors_is_born() -> Result<(), Error> {
    let mut world = world_with(5, 5, &[(1, 1), (3, 1), (2, 3)])?;
    world.advance();
    assert_eq!(world.get_cell_state((2, 2)), Some(State::Alive));
    Ok(())
}

#[test]
fn dead_cell_without_three_neighbors_stays_dead() -> Result<(), Error> {
    // Both (2, 2) and (2, 1) see exactly two live neighbors.
    let mut world = world_with(5, 5, &[(1, 1), (3, 1)])?;
    world.advance();
    assert_eq!(world.get_cell_state((2, 2)), Some(State::Dead));
    assert_eq!(world.get_cell_state((2, 1)), Some(State::Dead));
    Ok(())
}

#[test]
fn underpopulated_cell_dies() -> Result<(), Error> {
    let mut world = world_with(5, 5, &[(2, 2), (3, 2)])?;
    world.advance();
    assert!(world.is_extinct());
    Ok(())
}

#[test]
fn overpopulated_cell_dies() -> Result<(), Error> {
    // (2, 2) is alive with four live neighbors.
    let mut world = world_with(5, 5, &[(2, 2), (1, 1), (3, 1), (1, 3), (3, 3)])?;
    world.advance();
    assert_eq!(world.get_cell_state((2, 2)), Some(State::Dead));
    Ok(())
}

#[test]
fn edges_do_not_wrap_around() -> Result<(), Error> {
    // On a toroidal grid the corner (0, 0) would see the two cells in the
    // rightmost column as neighbors and survive; on an edge-bounded grid
    // it has no live neighbors at all.
    let mut world = world_with(4, 4, &[(0, 0), (3, 0), (3, 1)])?;
    world.advance();
    assert_eq!(world.get_cell_state((0, 0)), Some(State::Dead));
    Ok(())
}

#[test]
fn corner_cell_survives_with_its_only_neighbors() -> Result<(), Error> {
    // A corner has at most three neighbors; all of them are alive here,
    // so the whole 2x2 block in the corner is stable.
    let mut world = world_with(4, 4, &[(0, 0), (1, 0), (0, 1), (1, 1)])?;
    world.advance();
    assert_eq!(live_cells(&world), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    Ok(())
}

#[test]
fn glider_translates_diagonally() -> Result<(), Error> {
    let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
    let mut world = world_with(8, 8, &glider)?;
    world.advance();
    assert_eq!(live_cells(&world), vec![(0, 1), (2, 1), (1, 2), (2, 2), (1, 3)]);
    for _ in 0..3 {
        world.advance();
    }
    // One full period moves the glider one cell down and one cell right.
    assert_eq!(live_cells(&world), vec![(2, 1), (3, 2), (1, 3), (2, 3), (3, 3)]);
    Ok(())
}

#[test]
fn dead_world_is_absorbing_and_renotifies() -> Result<(), Error> {
    let notified = Rc::new(Cell::new(0));
    let counter = notified.clone();
    let mut world = world_with(3, 3, &[])?.on_extinct(move || counter.set(counter.get() + 1));
    for gen in 1..=3 {
        world.advance();
        assert!(world.is_extinct());
        assert_eq!(notified.get(), gen);
    }
    Ok(())
}

#[test]
fn extinction_fires_on_the_transition() -> Result<(), Error> {
    let notified = Rc::new(Cell::new(0));
    let counter = notified.clone();
    let mut world = world_with(3, 3, &[(1, 1)])?.on_extinct(move || counter.set(counter.get() + 1));
    assert_eq!(notified.get(), 0);
    world.advance();
    assert!(world.is_extinct());
    assert_eq!(notified.get(), 1);
    Ok(())
}

#[test]
fn extinction_is_silent_without_a_callback() -> Result<(), Error> {
    let mut world = world_with(3, 3, &[(1, 1)])?;
    world.advance();
    assert!(world.is_extinct());
    Ok(())
}

#[test]
fn out_of_range_reads_return_none() -> Result<(), Error> {
    let world = world_with(4, 3, &[(0, 0)])?;
    for coord in [(-1, 0), (0, -1), (4, 0), (0, 3), (4, 3), (i32::MIN, i32::MAX)] {
        assert_eq!(world.get_cell_state(coord), None);
    }
    Ok(())
}

#[test]
fn set_then_get_round_trips() -> Result<(), Error> {
    let mut world = world_with(4, 3, &[])?;
    world.set_cell_state((3, 2), State::Alive)?;
    assert_eq!(world.get_cell_state((3, 2)), Some(State::Alive));
    world.set_cell_state((3, 2), State::Dead)?;
    assert_eq!(world.get_cell_state((3, 2)), Some(State::Dead));
    Ok(())
}

#[test]
fn out_of_range_writes_are_rejected() -> Result<(), Error> {
    let mut world = world_with(4, 3, &[])?;
    for coord in [(-1, 0), (0, -1), (4, 0), (0, 3)] {
        assert_eq!(
            world.set_cell_state(coord, State::Alive),
            Err(Error::SetCellError(coord))
        );
    }
    assert_eq!(world.population(), 0);
    Ok(())
}

#[test]
fn construction_rejects_mismatched_buffers() {
    assert_eq!(
        Config::new(3, 3).world(&[0; 8]).err(),
        Some(Error::SizeMismatch(9, 8))
    );
    assert_eq!(
        Config::new(3, 3).world(&[0; 10]).err(),
        Some(Error::SizeMismatch(9, 10))
    );
}

#[test]
fn construction_rejects_non_positive_dimensions() {
    assert_eq!(
        Config::new(0, 3).world(&[]).err(),
        Some(Error::NonPositiveError)
    );
    assert_eq!(
        Config::new(3, -1).world(&[]).err(),
        Some(Error::NonPositiveError)
    );
}

#[test]
fn nonzero_bytes_decode_as_alive() -> Result<(), Error> {
    let world = Config::new(2, 2).world(&[0, 1, 2, 255])?;
    assert_eq!(world.get_cell_state((0, 0)), Some(State::Dead));
    assert_eq!(world.get_cell_state((1, 0)), Some(State::Alive));
    assert_eq!(world.get_cell_state((0, 1)), Some(State::Alive));
    assert_eq!(world.get_cell_state((1, 1)), Some(State::Alive));
    assert_eq!(world.population(), 3);
    Ok(())
}

#[test]
fn advance_is_deterministic() -> Result<(), Error> {
    let initial: Vec<u8> = (0..25).map(|i| (i % 3 == 0) as u8).collect();
    let mut first = Config::new(5, 5).world(&initial)?;
    let mut second = Config::new(5, 5).world(&initial)?;
    first.advance();
    second.advance();
    assert_eq!(first.dump(), second.dump());
    Ok(())
}

#[test]
fn visitor_reports_the_new_generation_in_row_major_order() -> Result<(), Error> {
    let mut world = world_with(5, 5, &[(1, 2), (2, 2), (3, 2)])?;
    let mut visited = Vec::new();
    world.advance_with(|coord, state| visited.push((coord, state)));
    assert_eq!(visited.len(), 25);
    for (index, &((x, y), state)) in visited.iter().enumerate() {
        assert_eq!((x, y), ((index % 5) as i32, (index / 5) as i32));
        assert_eq!(world.get_cell_state((x, y)), Some(state));
    }
    Ok(())
}

#[test]
fn generation_and_population_are_tracked() -> Result<(), Error> {
    let mut world = world_with(5, 5, &[(1, 2), (2, 2), (3, 2)])?;
    assert_eq!(world.generation(), 0);
    assert_eq!(world.population(), 3);
    world.advance();
    world.advance();
    assert_eq!(world.generation(), 2);
    assert_eq!(world.population(), 3);
    Ok(())
}

#[test]
fn dump_labels_the_grid() -> Result<(), Error> {
    let world = world_with(3, 2, &[(0, 0), (2, 1)])?;
    assert_eq!(world.dump(), "A D D\nD D A\n- - -\n");
    Ok(())
}

#[test]
fn initial_paint_matches_the_initial_buffer() -> Result<(), Error> {
    let world = Config::new(2, 2).world(&[1, 0, 0, 1])?;
    assert_eq!(live_cells(&world), vec![(0, 0), (1, 1)]);
    Ok(())
}
