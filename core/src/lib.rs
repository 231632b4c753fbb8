//! The vip8 interpreter core.
//!
//! A complete CHIP-8 virtual machine: 4 KiB of memory, sixteen 8-bit
//! registers, a 16-level call stack, two 60 Hz timers, a 64x32
//! monochrome frame buffer and a hexadecimal keypad, advanced one
//! instruction at a time.
//!
//! The crate knows nothing about windows, files or real time. A driver
//! supplies the program image, paces [`Interpreter::step`] and
//! [`Interpreter::tick_60hz`] at its two cadences, feeds key changes in
//! and presents the frame buffer whenever the redraw flag fires. Any
//! contract violation by the running program surfaces as a typed
//! [`Fault`] instead of tearing the process down.

pub use crate::error::Fault;
pub use crate::interpreter::Interpreter;
pub use crate::state::{FrameBuffer, State};

pub mod constants;
mod error;
mod font;
mod instruction;
mod interpreter;
mod opcode;
mod operations;
mod state;
