use life_grid::{
    config::Config,
    draw::{self, App},
    proc::Life,
};

use clap::Parser;
use log::debug;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::parse();
    init_logger(&cfg)?;
    cfg.validate()?;
    debug!("start life_grid with config: {:#?}", cfg);

    let size = cfg.geometry()?;
    let life = match &cfg.pattern {
        Some(path) => Life::from_pattern(&std::fs::read_to_string(path)?, size)?,
        None => Life::new(size),
    };

    draw::run(App::new(life, &cfg))?;
    Ok(())
}

fn init_logger(cfg: &Config) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&cfg.rust_log);
    if let Some(path) = &cfg.log_file {
        let file = std::fs::File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
