use crate::error::{LifeError, Result};

/// Fixed size of the playing field, in cells.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Rect {
    w: u16, // columns, x
    h: u16, // rows, y
}

/// A cell position: column `x`, row `y`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

const OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

impl Coord {
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Coord { x, y }
    }
}

impl From<(u16, u16)> for Coord {
    #[inline]
    fn from((x, y): (u16, u16)) -> Self {
        Coord { x, y }
    }
}

impl Rect {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::EmptyGrid);
        }
        Ok(Rect { w: width, h: height })
    }

    #[inline]
    pub fn w(&self) -> u16 {
        self.w
    }

    #[inline]
    pub fn h(&self) -> u16 {
        self.h
    }

    #[inline]
    pub fn dims(&self) -> (u16, u16) {
        (self.w, self.h)
    }

    /// Number of cells on the field.
    #[inline]
    pub fn area(&self) -> usize {
        self.w as usize * self.h as usize
    }

    #[inline]
    pub fn is_in_bounds(&self, c: Coord) -> bool {
        c.x < self.w && c.y < self.h
    }

    /// Bounds check for signed positions, e.g. a cursor moved past an edge.
    pub fn checked(&self, x: i32, y: i32) -> Option<Coord> {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            None
        } else {
            Some(Coord::new(x as u16, y as u16))
        }
    }

    /// Like [`Rect::checked`] but reports the rejected position.
    pub fn require(&self, x: i32, y: i32) -> Result<Coord> {
        self.checked(x, y).ok_or(LifeError::OutOfBounds {
            x,
            y,
            width: self.w,
            height: self.h,
        })
    }

    /// The up to 8 cells around `c`, clipped at the edges. No wraparound.
    ///
    /// Always yields in the same row-major order, so corners give 3 cells,
    /// edges 5 and interior cells 8.
    pub fn neighbors_of(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.checked(c.x as i32 + dx, c.y as i32 + dy))
    }

    /// Every coordinate of the field, row by row.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.h).flat_map(move |y| (0..self.w).map(move |x| Coord::new(x, y)))
    }
}
