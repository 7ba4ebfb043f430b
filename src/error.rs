use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifeError>;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },

    #[error("grid width and height must be non-zero")]
    EmptyGrid,

    #[error("fail to parse grid size: {0}")]
    InvalidSize(String),

    #[error("fail to parse cells range: {0}")]
    InvalidRange(String),

    #[error("pattern is {width}x{height} but the grid is only {grid_width}x{grid_height}")]
    PatternTooLarge {
        width: usize,
        height: usize,
        grid_width: u16,
        grid_height: u16,
    },

    #[error("config: {0}")]
    Config(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
