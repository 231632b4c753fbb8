use thiserror::Error;

/// Faults the interpreter can raise.
///
/// None of these are recoverable for the current run. The interpreter
/// makes no attempt to retry or skip; it reports the fault and leaves the
/// machine in a consistent state so the host can decide whether to halt,
/// reset, or surface diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// Decode matched no known instruction pattern. Raised before any
    /// state is touched; the program counter still points at the word.
    #[error("unsupported opcode {opcode:#06X}")]
    UnsupportedOpcode { opcode: u16 },

    /// A call would exceed the 16-level return stack.
    #[error("call stack overflow")]
    StackOverflow,

    /// A return was executed with an empty return stack.
    #[error("call stack underflow")]
    StackUnderflow,

    /// A computed address fell outside the 4 KiB address space.
    #[error("address {address:#06X} is outside addressable memory")]
    OutOfBoundsAddress { address: u16 },

    /// A program image does not fit in memory starting at 0x200.
    /// Reported at load time, never during execution.
    #[error("program image of {size} bytes does not fit in memory")]
    ImageTooLarge { size: usize },
}
