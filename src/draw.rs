use std::{
    io::{stdout, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    thread,
    time::{Duration, Instant},
};

use crossterm::{
    cursor::{Hide, MoveTo, RestorePosition, SavePosition, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{CellsRange, Config},
    error::{LifeError, Result},
    geometry::Coord,
    proc::Life,
};

const ALIVE: char = '#';
const DEAD: char = '.';
const CURSOR_ALIVE: char = '@';
const CURSOR_DEAD: char = '+';

/// Lines under the grid: status and key help.
const FOOTER_ROWS: u16 = 2;

static DELAYS: [u64; 14] = [1, 10, 20, 40, 60, 100, 150, 200, 300, 450, 800, 1200, 1500, 2000];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Stop,
    Randomize,
    Clear,
    Move(i32, i32),
    Toggle,
    Faster,
    Slower,
    Quit,
}

/// Play/pause state and everything else the core leaves to its caller.
pub struct App {
    life: Life,
    paused: bool,
    should_exit: bool,
    cursor: Coord,
    upd_timeout: u64,
    cell_size: u16,
    random: CellsRange,
    maxgen: Option<u64>,
    rng: StdRng,
}

impl App {
    pub fn new(life: Life, cfg: &Config) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (w, h) = life.geometry().dims();
        App {
            life,
            paused: true,
            should_exit: false,
            cursor: Coord::new(w / 2, h / 2),
            upd_timeout: cfg.interval_ms,
            cell_size: cfg.cell_size.max(1),
            random: cfg.random,
            maxgen: cfg.max_generations,
            rng,
        }
    }

    #[inline]
    pub fn life(&self) -> &Life {
        &self.life
    }

    #[inline]
    pub fn pause(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    #[inline]
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    #[inline]
    pub fn upd_timeout(&self) -> u64 {
        self.upd_timeout
    }

    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::TogglePause => {
                self.paused = !self.paused;
                info!("{}", if self.paused { "paused" } else { "playing" });
            }
            Command::Stop => {
                self.paused = true;
                self.life.stop();
                info!("stopped");
            }
            Command::Randomize => {
                let count = self.rng.gen_range(self.random.range());
                self.life.randomize(count, &mut self.rng);
                info!("randomized with {} alive", self.life.population());
            }
            Command::Clear => {
                self.life.clear();
                info!("cleared");
            }
            Command::Move(dx, dy) => {
                let size = *self.life.geometry();
                let x = (self.cursor.x as i32 + dx).clamp(0, size.w() as i32 - 1);
                let y = (self.cursor.y as i32 + dy).clamp(0, size.h() as i32 - 1);
                self.cursor = Coord::new(x as u16, y as u16);
            }
            Command::Toggle => {
                if !self.paused {
                    info!("toggle ignored while playing");
                    return;
                }
                let Coord { x, y } = self.cursor;
                if let Err(e) = self.life.toggle(x as i32, y as i32) {
                    warn!("toggle rejected: {}", e);
                }
            }
            Command::Faster => {
                self.upd_timeout = DELAYS
                    .iter()
                    .rev()
                    .copied()
                    .find(|&d| d < self.upd_timeout)
                    .unwrap_or(DELAYS[0]);
                info!("delay {}ms", self.upd_timeout);
            }
            Command::Slower => {
                self.upd_timeout = DELAYS
                    .iter()
                    .copied()
                    .find(|&d| d > self.upd_timeout)
                    .unwrap_or(DELAYS[DELAYS.len() - 1]);
                info!("delay {}ms", self.upd_timeout);
            }
            Command::Quit => self.should_exit = true,
        }
    }

    /// One tick of the play loop: steps only while playing and below the
    /// generation limit. Returns whether a step happened.
    pub fn advance(&mut self) -> bool {
        if self.paused {
            return false;
        }
        if let Some(max) = self.maxgen {
            if self.life.generation() >= max {
                self.paused = true;
                info!("reached generation limit {}", max);
                return false;
            }
        }
        self.life.tick();
        true
    }

    pub fn status_line(&self) -> String {
        format!(
            "Generation: {} | Alive Cells: {} | Status: {}",
            self.life.generation(),
            self.life.population(),
            if self.paused { "Paused" } else { "Playing" },
        )
    }
}

/// Text rows of the grid, each cell repeated `cell_size` columns wide.
pub fn frame_lines(life: &Life, cell_size: u16, cursor: Option<Coord>) -> Vec<String> {
    let (w, h) = life.geometry().dims();
    let cell_size = cell_size.max(1) as usize;
    (0..h)
        .map(|y| {
            let mut row = String::with_capacity(w as usize * cell_size);
            for x in 0..w {
                let c = Coord::new(x, y);
                let glyph = match (life.is_alive(c), cursor == Some(c)) {
                    (true, true) => CURSOR_ALIVE,
                    (false, true) => CURSOR_DEAD,
                    (true, false) => ALIVE,
                    (false, false) => DEAD,
                };
                row.extend(std::iter::repeat(glyph).take(cell_size));
            }
            row
        })
        .collect()
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(Command::TogglePause),
        KeyCode::Char('s') => Some(Command::Stop),
        KeyCode::Char('r') => Some(Command::Randomize),
        KeyCode::Char('c') => Some(Command::Clear),
        KeyCode::Char('t') | KeyCode::Enter => Some(Command::Toggle),
        KeyCode::Char('j') | KeyCode::Char('+') => Some(Command::Faster),
        KeyCode::Char('k') | KeyCode::Char('-') => Some(Command::Slower),
        KeyCode::Left => Some(Command::Move(-1, 0)),
        KeyCode::Right => Some(Command::Move(1, 0)),
        KeyCode::Up => Some(Command::Move(0, -1)),
        KeyCode::Down => Some(Command::Move(0, 1)),
        _ => None,
    }
}

pub fn run(mut a: App) -> Result<()> {
    fits_terminal(&a)?;
    runup()?;
    clear()?;
    let d = draw(&mut a);
    shutdown()?;
    d?;
    info!(
        "exited at generation {} with {} alive",
        a.life.generation(),
        a.life.population()
    );
    Ok(())
}

fn fits_terminal(a: &App) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let (w, h) = a.life.geometry().dims();
    let need_cols = w as u32 * a.cell_size as u32;
    let need_rows = h as u32 + FOOTER_ROWS as u32;
    if need_cols > cols as u32 || need_rows > rows as u32 {
        return Err(LifeError::Config(format!(
            "terminal is {}x{} but the grid needs {}x{}",
            cols, rows, need_cols, need_rows
        )));
    }
    Ok(())
}

fn runup() -> Result<()> {
    execute!(std::io::stderr(), EnterAlternateScreen, SetTitle("Game of Life"), Hide)?;
    enable_raw_mode()?;
    clear()?;
    execute!(stdout(), SavePosition)?;
    Ok(())
}

fn shutdown() -> Result<()> {
    execute!(std::io::stderr(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}

fn draw(a: &mut App) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let done = Arc::new(AtomicBool::new(false));
    let keys_done = Arc::clone(&done);

    let keys = thread::Builder::new()
        .name("Keyboard input".into())
        .spawn(move || {
            while !keys_done.load(Ordering::Relaxed) {
                match hotkeys() {
                    Ok(Some(cmd)) => {
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!("keyboard input failed: {}", e);
                        let _ = tx.send(Command::Quit);
                        break;
                    }
                }
            }
        })?;

    info!("started on a {}x{} grid", a.life.geometry().w(), a.life.geometry().h());
    let res = frames(a, &rx);

    done.store(true, Ordering::Relaxed);
    let _ = keys.join();
    res
}

fn frames(a: &mut App, rx: &mpsc::Receiver<Command>) -> Result<()> {
    let mut out = stdout();
    while !a.should_exit() {
        let started = Instant::now();

        for cmd in rx.try_iter() {
            a.apply(cmd);
        }
        if a.should_exit() {
            break;
        }

        a.advance();
        paint(&mut out, a)?;

        let wait = if a.pause() {
            Duration::from_millis(30)
        } else {
            Duration::from_millis(a.upd_timeout())
        };
        if let Some(rest) = wait.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
    Ok(())
}

fn paint<W: Write>(out: &mut W, a: &App) -> Result<()> {
    let cursor = a.pause().then_some(a.cursor());
    let lines = frame_lines(&a.life, a.cell_size, cursor);

    queue!(out, MoveTo(0, 0))?;
    for (y, line) in lines.iter().enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        let mut current = None;
        for ch in line.chars() {
            let color = match ch {
                ALIVE => Color::Green,
                CURSOR_ALIVE | CURSOR_DEAD => Color::Yellow,
                _ => Color::DarkGrey,
            };
            if current != Some(color) {
                queue!(out, SetForegroundColor(color))?;
                current = Some(color);
            }
            queue!(out, Print(ch))?;
        }
    }

    let footer = lines.len() as u16;
    queue!(
        out,
        ResetColor,
        MoveTo(0, footer),
        Clear(ClearType::UntilNewLine),
        Print(a.status_line()),
        MoveTo(0, footer + 1),
        Clear(ClearType::UntilNewLine),
        Print("p start/pause  s stop  r random  c clear  arrows+t toggle  j/k speed  q quit"),
    )?;
    out.flush()?;
    Ok(())
}

fn clear() -> Result<()> {
    execute!(stdout(), Clear(ClearType::Purge), Clear(ClearType::All))?;
    execute!(stdout(), RestorePosition)?;
    Ok(())
}

fn hotkeys() -> Result<Option<Command>> {
    if event::poll(Duration::from_millis(150))? {
        if let Event::Key(key) = event::read()? {
            return Ok(command_for(key));
        }
    }
    Ok(None)
}
