/// Width of the monochrome display in pixels.
pub const DISPLAY_WIDTH: usize = 64;

/// Height of the monochrome display in pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory; addresses are 12 bits wide.
pub const MEMORY_SIZE: usize = 0x1000;

/// Where program images are loaded and execution begins.
pub const PROGRAM_START: u16 = 0x200;

/// Largest program image that fits between 0x200 and the end of memory.
pub const MAX_IMAGE_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Call depth supported by the return stack.
pub const STACK_DEPTH: usize = 16;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;
