pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod proc;

pub use error::{LifeError, Result};
pub use geometry::{Coord, Rect};
pub use proc::{Life, LiveSet};
