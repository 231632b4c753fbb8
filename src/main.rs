use log::error;

use vip8_core::Interpreter;

mod cli;
mod keymap;
mod run;

fn main() {
    let cli = cli::init();

    let image = match std::fs::read(&cli.rom) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("unable to read {}: {e}", cli.rom.display());
            std::process::exit(1);
        }
    };

    let mut interpreter = Interpreter::new();
    if let Err(fault) = interpreter.load_image(&image) {
        error!("{fault}");
        std::process::exit(1);
    }

    if let Err(e) = run::run(&mut interpreter, cli.clock, cli.scale) {
        error!("{e}");
        std::process::exit(1);
    }
}
