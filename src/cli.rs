use std::path::PathBuf;

use clap::Parser;

/// SDL2 frontend for the vip8 CHIP-8 interpreter.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to a CHIP-8 program image
    pub rom: PathBuf,

    /// Instruction rate in steps per second. Timers always run at
    /// 60 Hz regardless of this.
    #[arg(long, default_value_t = 700, value_parser = clap::value_parser!(u32).range(1..))]
    pub clock: u32,

    /// Window scale factor
    #[arg(long, default_value_t = 10)]
    pub scale: u32,

    /// Logging verbosity (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,
}

pub fn init() -> Cli {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .parse_filters(&cli.log_level)
        .init();
    cli
}
