use std::time::{Duration, Instant};

use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8_core::Interpreter;
use vip8_display::Display;

use crate::keymap::keymap;

/// Timer cadence fixed by the hardware: 60 Hz, whatever the clock rate.
const TIMER_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Drive the interpreter until the window closes or the machine faults.
///
/// Stepping and timer ticks run on two independent deadline
/// accumulators, so changing the instruction rate never skews the
/// timers.
pub fn run(interpreter: &mut Interpreter, clock: u32, scale: u32) -> Result<(), String> {
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump()?;

    let step_interval = Duration::from_secs(1) / clock;
    let mut next_step = Instant::now();
    let mut next_tick = Instant::now();
    info!("running at {clock} steps per second");

    'main: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'main,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(k) = keymap(key) {
                        interpreter.set_key(k, true);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(k) = keymap(key) {
                        interpreter.set_key(k, false);
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        while next_step <= now {
            if let Err(fault) = interpreter.step() {
                error!("machine halted: {fault}");
                break 'main;
            }
            next_step += step_interval;
        }
        while next_tick <= now {
            interpreter.tick_60hz();
            next_tick += TIMER_INTERVAL;
        }

        if interpreter.consume_redraw_flag() {
            display.render(interpreter.frame_buffer())?;
        }

        let deadline = next_step.min(next_tick);
        if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
    }

    Ok(())
}
