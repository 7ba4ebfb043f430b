use std::collections::HashSet;

use log::{debug, trace};
use rand::Rng;

use crate::{
    error::{LifeError, Result},
    geometry::{Coord, Rect},
};

/// All cells alive in one generation.
pub type LiveSet = HashSet<Coord>;

/// Owns the current generation of a single field.
///
/// Every mutation goes through a method here; a step always swaps in a
/// freshly computed [`LiveSet`], so readers never see half a generation.
#[derive(Debug, Clone)]
pub struct Life {
    size: Rect,
    live: LiveSet,
    generation: u64,
}

impl Life {
    #[inline]
    pub fn new(size: Rect) -> Self {
        Life {
            size,
            live: LiveSet::new(),
            generation: 0,
        }
    }

    /// Starts from an explicit set of cells, rejecting any outside the field.
    pub fn with_cells<I>(size: Rect, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut live = LiveSet::new();
        for c in cells {
            size.require(c.x as i32, c.y as i32)?;
            live.insert(c);
        }
        Ok(Life {
            size,
            live,
            generation: 0,
        })
    }

    /// Reads a text pattern, one line per row. `0`, `.` and space are dead,
    /// anything else is alive. Leading blank lines are skipped and the first
    /// blank line after a row ends the pattern.
    pub fn from_pattern(s: &str, size: Rect) -> Result<Self> {
        let rows: Vec<&str> = s
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .skip_while(|l| l.is_empty())
            .take_while(|l| !l.is_empty())
            .collect();

        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if width > size.w() as usize || rows.len() > size.h() as usize {
            return Err(LifeError::PatternTooLarge {
                width,
                height: rows.len(),
                grid_width: size.w(),
                grid_height: size.h(),
            });
        }

        let mut live = LiveSet::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '0' | '.' | ' ' => {}
                    _ => {
                        live.insert(Coord::new(x as u16, y as u16));
                    }
                }
            }
        }
        debug!("loaded {}x{} pattern with {} live cells", width, rows.len(), live.len());

        Ok(Life {
            size,
            live,
            generation: 0,
        })
    }

    #[inline]
    pub fn geometry(&self) -> &Rect {
        &self.size
    }

    #[inline]
    pub fn live_cells(&self) -> &LiveSet {
        &self.live
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_alive(&self, c: Coord) -> bool {
        self.live.contains(&c)
    }

    pub fn tick(&mut self) {
        self.live = step(&self.live, &self.size);
        self.generation += 1;
        trace!("generation {}: {} alive", self.generation, self.live.len());
    }

    /// Replaces the field with `count` random draws and restarts the count.
    pub fn randomize<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.live = randomize(count, &self.size, rng);
        self.generation = 0;
        debug!("randomized: {} draws, {} alive", count, self.live.len());
    }

    pub fn clear(&mut self) {
        self.live = clear();
        self.generation = 0;
        debug!("cleared");
    }

    /// Drops the whole run: no live cells, generation back to 0.
    pub fn stop(&mut self) {
        self.live = clear();
        self.generation = 0;
        debug!("stopped");
    }

    /// Flips one cell and returns its new state. Out-of-bounds positions are
    /// rejected and leave the field untouched.
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<bool> {
        let c = self.size.require(x, y)?;
        self.live = toggle(c, &self.live, &self.size)?;
        let alive = self.live.contains(&c);
        debug!("toggled ({}, {}) -> {}", c.x, c.y, if alive { "alive" } else { "dead" });
        Ok(alive)
    }
}

/// B3/S23.
#[inline]
pub fn next_state(alive: bool, neighbors: usize) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

#[inline]
pub fn alive_neighbors(live: &LiveSet, size: &Rect, c: Coord) -> usize {
    size.neighbors_of(c).filter(|n| live.contains(n)).count()
}

/// Computes the next generation without touching `live`.
///
/// Only cells within one step of a live cell can change, so survivors are
/// taken from `live` itself and births from the union of its neighborhoods.
pub fn step(live: &LiveSet, size: &Rect) -> LiveSet {
    let mut next = LiveSet::with_capacity(live.len());
    let mut candidates = LiveSet::new();

    for &c in live {
        let mut count = 0;
        for n in size.neighbors_of(c) {
            if live.contains(&n) {
                count += 1;
            } else {
                candidates.insert(n);
            }
        }
        if next_state(true, count) {
            next.insert(c);
        }
    }

    for c in candidates {
        if next_state(false, alive_neighbors(live, size, c)) {
            next.insert(c);
        }
    }

    next
}

/// `count` uniform draws with replacement; duplicates collapse, so the
/// result may hold fewer than `count` cells.
pub fn randomize<R: Rng + ?Sized>(count: usize, size: &Rect, rng: &mut R) -> LiveSet {
    (0..count)
        .map(|_| Coord::new(rng.gen_range(0..size.w()), rng.gen_range(0..size.h())))
        .collect()
}

#[inline]
pub fn clear() -> LiveSet {
    LiveSet::new()
}

pub fn toggle(c: Coord, live: &LiveSet, size: &Rect) -> Result<LiveSet> {
    size.require(c.x as i32, c.y as i32)?;
    let mut next = live.clone();
    if !next.remove(&c) {
        next.insert(c);
    }
    Ok(next)
}
