use crate::cli::{self, Args};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use lifebox_lib::{Coord, State, World};
use std::{
    cell::Cell,
    io::{self, Stdout, Write},
    rc::Rc,
    time::Duration,
};

/// Status of the simulation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    /// Advancing one generation per frame.
    Running,
    /// Waiting for input.
    Paused,
    /// Every cell is dead.
    Extinct,
}

struct GameWindow {
    stdout: Stdout,
    status: Status,
    frame_time: Duration,
    max_gen: Option<u64>,
    quit: bool,
}

impl GameWindow {
    fn new(args: &Args) -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(GameWindow {
            stdout,
            status: Status::Running,
            frame_time: Duration::from_millis(1000 / args.fps),
            max_gen: args.max_gen,
            quit: false,
        })
    }

    fn close(&mut self) -> io::Result<()> {
        execute!(self.stdout, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Appends one cell to the frame, ending the line at the last column.
    fn draw_cell(frame: &mut String, width: i32, (x, _): Coord, state: State) {
        frame.push(if state.is_alive() { '#' } else { ' ' });
        if x == width - 1 {
            frame.push_str("\r\n");
        }
    }

    fn draw(&mut self, world: &World, frame: &str) -> io::Result<()> {
        let status_str = match self.status {
            Status::Running => "Running. Press [space] to pause, [q] to quit.",
            Status::Paused => {
                "Paused. Press [space] to resume, [s] to step, [r] to reseed, [q] to quit."
            }
            Status::Extinct => "The world has died out. Press [r] to reseed, [q] to quit.",
        };
        queue!(
            self.stdout,
            MoveTo(0, 0),
            Clear(ClearType::All),
            Print(format!(
                "Gen: {}  Cells: {}  {}\r\n",
                world.generation(),
                world.population(),
                status_str
            )),
            Print(frame),
        )?;
        self.stdout.flush()
    }

    /// Advances one generation, rebuilding the frame from the per-cell
    /// visitor, and redraws.
    fn step(&mut self, world: &mut World, extinct: &Cell<bool>, frame: &mut String) -> io::Result<()> {
        frame.clear();
        let width = world.config().width;
        world.advance_with(|coord, state| Self::draw_cell(frame, width, coord, state));
        if extinct.get() {
            self.status = Status::Extinct;
        } else if self.max_gen.map_or(false, |max| world.generation() >= max) {
            self.status = Status::Paused;
        }
        self.draw(world, frame)
    }

    /// Rebuilds the frame from the current generation and redraws.
    fn repaint(&mut self, world: &World, frame: &mut String) -> io::Result<()> {
        frame.clear();
        let width = world.config().width;
        world.for_each_cell(|coord, state| Self::draw_cell(frame, width, coord, state));
        self.draw(world, frame)
    }

    fn handle_key(
        &mut self,
        key: KeyEvent,
        world: &mut World,
        args: &Args,
        extinct: &Cell<bool>,
        frame: &mut String,
    ) -> io::Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char(' ') => match self.status {
                Status::Running => {
                    self.status = Status::Paused;
                    self.draw(world, frame)?;
                }
                Status::Paused => {
                    self.status = Status::Running;
                    self.draw(world, frame)?;
                }
                Status::Extinct => (),
            },
            KeyCode::Char('s') => {
                if self.status == Status::Paused {
                    self.step(world, extinct, frame)?;
                }
            }
            KeyCode::Char('r') => {
                cli::reseed(world, args.density, &mut cli::rng_from(args.seed));
                extinct.set(false);
                self.status = Status::Paused;
                self.repaint(world, frame)?;
            }
            _ => (),
        }
        Ok(())
    }

    fn main_loop(
        &mut self,
        world: &mut World,
        args: &Args,
        extinct: &Cell<bool>,
    ) -> io::Result<()> {
        let config = world.config();
        let mut frame = String::with_capacity(config.area() + 2 * config.height as usize);
        self.repaint(world, &mut frame)?;
        while !self.quit {
            if self.status == Status::Running {
                if event::poll(self.frame_time)? {
                    if let Event::Key(key) = event::read()? {
                        self.handle_key(key, world, args, extinct, &mut frame)?;
                    }
                } else {
                    self.step(world, extinct, &mut frame)?;
                }
            } else if let Event::Key(key) = event::read()? {
                self.handle_key(key, world, args, extinct, &mut frame)?;
            }
        }
        Ok(())
    }
}

/// Drives the world in an interactive terminal loop.
///
/// Each frame advances one generation and renders it from the per-cell
/// visitor; the loop stops advancing when the extinction callback fires.
pub fn run_with_tui(world: World, args: &Args) -> io::Result<()> {
    let extinct = Rc::new(Cell::new(false));
    let flag = extinct.clone();
    let mut world = world.on_extinct(move || flag.set(true));
    let mut window = GameWindow::new(args)?;
    let result = window.main_loop(&mut world, args, &extinct);
    window.close()?;
    result
}
