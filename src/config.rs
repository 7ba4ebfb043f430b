use std::{ops::Range, path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;

use crate::{
    error::{LifeError, Result},
    geometry::Rect,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "life_grid", version, about = "Conway's Game of Life on a bounded grid")]
pub struct Config {
    /// Grid size in cells, as WIDTHxHEIGHT.
    #[arg(long, env = "LIFE_SIZE", default_value = "40x40")]
    pub size: GameSize,

    /// Terminal columns drawn per cell.
    #[arg(long, env = "LIFE_CELL_SIZE", default_value_t = 2)]
    pub cell_size: u16,

    /// Delay between generations while playing.
    #[arg(long, env = "LIFE_INTERVAL_MS", default_value_t = 50)]
    pub interval_ms: u64,

    /// Range the number of random draws is picked from, as FROM-TO.
    #[arg(long, env = "LIFE_RANDOM", default_value = "200-400")]
    pub random: CellsRange,

    /// Seed for the random pattern generator.
    #[arg(long, env = "LIFE_SEED")]
    pub seed: Option<u64>,

    /// Starting pattern file.
    #[arg(long)]
    pub pattern: Option<PathBuf>,

    /// Stop stepping after this many generations.
    #[arg(long)]
    pub max_generations: Option<u64>,

    #[arg(long, env = "RUST_LOG", default_value = "life_grid=warn")]
    pub rust_log: String,

    /// Write logs here instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSize {
    pub x: u16,
    pub y: u16,
}

/// Half-open: `from` is drawable, `to` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellsRange {
    pub from: u16,
    pub to: u16,
}

impl FromStr for GameSize {
    type Err = LifeError;

    fn from_str(src: &str) -> Result<Self> {
        let bad = || LifeError::InvalidSize(src.to_owned());
        let (x, y) = src.split_once(['x', 'X']).ok_or_else(bad)?;
        let x = x.trim().parse().map_err(|_| bad())?;
        let y = y.trim().parse().map_err(|_| bad())?;

        Ok(GameSize { x, y })
    }
}

impl FromStr for CellsRange {
    type Err = LifeError;

    fn from_str(src: &str) -> Result<Self> {
        let bad = || LifeError::InvalidRange(src.to_owned());
        let (from, to) = src.split_once('-').ok_or_else(bad)?;
        let from = from.trim().parse().map_err(|_| bad())?;
        let to: u16 = to.trim().parse().map_err(|_| bad())?;
        if from >= to {
            return Err(bad());
        }

        Ok(CellsRange { from, to })
    }
}

impl CellsRange {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.from as usize..self.to as usize
    }
}

impl Config {
    pub fn geometry(&self) -> Result<Rect> {
        Rect::new(self.size.x, self.size.y)
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Checks what clap cannot: non-empty grid, visible cells.
    pub fn validate(&self) -> Result<()> {
        self.geometry()?;
        if self.cell_size == 0 {
            return Err(LifeError::Config("cell size must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["life_grid"]).unwrap();
        assert_eq!(cfg.size, GameSize { x: 40, y: 40 });
        assert_eq!(cfg.cell_size, 2);
        assert_eq!(cfg.interval(), Duration::from_millis(50));
        assert_eq!(cfg.random.range(), 200..400);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn flags() {
        let cfg = Config::try_parse_from([
            "life_grid",
            "--size",
            "12x7",
            "--random",
            "5-9",
            "--seed",
            "3",
            "--max-generations",
            "100",
        ])
        .unwrap();
        let g = cfg.geometry().unwrap();
        assert_eq!(g.dims(), (12, 7));
        assert_eq!(cfg.random, CellsRange { from: 5, to: 9 });
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.max_generations, Some(100));
    }

    #[test]
    fn size_parsing() {
        assert_eq!("5x5".parse::<GameSize>().unwrap(), GameSize { x: 5, y: 5 });
        assert_eq!("30X10".parse::<GameSize>().unwrap(), GameSize { x: 30, y: 10 });
        assert!(matches!("30".parse::<GameSize>(), Err(LifeError::InvalidSize(_))));
        assert!("ax3".parse::<GameSize>().is_err());
        assert!("-1x3".parse::<GameSize>().is_err());
    }

    #[test]
    fn range_parsing() {
        assert_eq!("200-400".parse::<CellsRange>().unwrap().range(), 200..400);
        assert!(matches!("400-200".parse::<CellsRange>(), Err(LifeError::InvalidRange(_))));
        assert!("7-7".parse::<CellsRange>().is_err());
        assert!("7".parse::<CellsRange>().is_err());
    }

    #[test]
    fn zero_sized_grid_fails_validation() {
        let cfg = Config::try_parse_from(["life_grid", "--size", "0x10"]).unwrap();
        assert!(matches!(cfg.validate(), Err(LifeError::EmptyGrid)));
    }

    #[test]
    fn zero_cell_size_fails_validation() {
        let cfg = Config::try_parse_from(["life_grid", "--cell-size", "0"]).unwrap();
        assert!(matches!(cfg.validate(), Err(LifeError::Config(_))));
    }
}
