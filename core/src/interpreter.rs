use log::{debug, trace};

use crate::constants::{MAX_IMAGE_SIZE, PROGRAM_START};
use crate::error::Fault;
use crate::instruction;
use crate::opcode::Opcode;
use crate::state::{FrameBuffer, State};

/// The CHIP-8 virtual machine.
///
/// Owns every piece of machine state and advances it on demand:
/// - [`step`](Interpreter::step) runs one fetch-decode-execute cycle
/// - [`tick_60hz`](Interpreter::tick_60hz) decays the two timers
/// - [`set_key`](Interpreter::set_key) records keypad changes
/// - [`frame_buffer`](Interpreter::frame_buffer) and
///   [`consume_redraw_flag`](Interpreter::consume_redraw_flag) feed an
///   external renderer
///
/// The instruction cadence and the timer cadence are independent by
/// design: a driver calls `step` at whatever rate it wants the CPU to
/// run and `tick_60hz` at 60 Hz wall-clock. Neither call ever invokes
/// the other.
///
/// There is no interior locking; a host that shares an interpreter
/// across threads must provide its own synchronization.
pub struct Interpreter {
    state: State,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            state: State::new(),
        }
    }

    /// Restore power-on state. The font region is repopulated; a new
    /// image can then be loaded without constructing a new machine.
    pub fn reset(&mut self) {
        self.state = State::new();
        debug!("machine reset");
    }

    /// Copy a program image into memory starting at 0x200.
    ///
    /// The image format is the de facto CHIP-8 one: raw big-endian
    /// opcode bytes, two per instruction, preserved bit-exactly.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), Fault> {
        if image.len() > MAX_IMAGE_SIZE {
            return Err(Fault::ImageTooLarge { size: image.len() });
        }
        let start = usize::from(PROGRAM_START);
        self.state.memory[start..start + image.len()].copy_from_slice(image);
        debug!("loaded {} byte image at {:#05X}", image.len(), PROGRAM_START);
        Ok(())
    }

    /// Run exactly one fetch-decode-execute cycle.
    ///
    /// Timers are never touched here. While the machine is parked on a
    /// wait-for-key this is a no-op; execution resumes when
    /// [`set_key`](Interpreter::set_key) reports a press.
    ///
    /// Fetch and decode faults leave the machine untouched, with the
    /// program counter still naming the offending word.
    pub fn step(&mut self) -> Result<(), Fault> {
        if self.state.waiting_on_key.is_some() {
            return Ok(());
        }
        let op = self.fetch()?;
        let operation = instruction::decode(op)?;
        trace!("pc={:#05X} op={op} i={:#05X} sp={}", self.state.pc, self.state.i, self.state.sp);
        self.state.pc += 2;
        operation(&mut self.state, op)
    }

    /// Big-endian combine of the two bytes at the program counter.
    fn fetch(&self) -> Result<Opcode, Fault> {
        let base = self.state.range(self.state.pc, 2)?;
        Ok(Opcode::from_bytes(
            self.state.memory[base],
            self.state.memory[base + 1],
        ))
    }

    /// Decrement both timers, saturating at zero.
    ///
    /// Called by the driver at a fixed 60 Hz, independent of however
    /// fast it is stepping instructions.
    pub fn tick_60hz(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Record a key state change. A press also satisfies a pending
    /// wait-for-key, storing the key in the parked register.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        let key = key & 0xF;
        self.state.keys[usize::from(key)] = pressed;
        if pressed {
            if let Some(register) = self.state.waiting_on_key.take() {
                self.state.v[register] = key;
            }
        }
    }

    /// Read view of the display, indexed `[y][x]`.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether anything has drawn since the last call; clears the flag.
    ///
    /// This is the driver's acknowledgment: call it, and if it returns
    /// true present [`frame_buffer`](Interpreter::frame_buffer).
    pub fn consume_redraw_flag(&mut self) -> bool {
        std::mem::take(&mut self.state.redraw)
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    /// A host that wants sound plays a tone while this is non-zero.
    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// Read view of the whole machine, for diagnostics after a fault.
    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MEMORY_SIZE;

    #[test]
    fn step_fetches_big_endian_and_executes() {
        let mut vm = Interpreter::new();
        vm.load_image(&[0x61, 0xAB]).unwrap();
        vm.step().unwrap();
        assert_eq!(vm.state.v[0x1], 0xAB);
        assert_eq!(vm.state.pc, 0x202);
    }

    #[test]
    fn load_image_accepts_exactly_the_free_space() {
        let mut vm = Interpreter::new();
        vm.load_image(&[0xAA; 3584]).unwrap();
        assert_eq!(vm.state.memory[0x200..], [0xAA; 3584]);
        assert_eq!(
            vm.load_image(&[0xAA; 3585]),
            Err(Fault::ImageTooLarge { size: 3585 })
        );
    }

    #[test]
    fn unsupported_opcode_leaves_the_machine_at_the_faulting_word() {
        let mut vm = Interpreter::new();
        vm.load_image(&[0x00, 0x00]).unwrap();
        let before = vm.state.clone();
        assert_eq!(
            vm.step(),
            Err(Fault::UnsupportedOpcode { opcode: 0x0000 })
        );
        assert_eq!(vm.state, before);
    }

    #[test]
    fn fetch_past_the_end_of_memory_faults() {
        let mut vm = Interpreter::new();
        vm.load_image(&[0x1F, 0xFF]).unwrap(); // jump to 0xFFF
        vm.step().unwrap();
        assert_eq!(
            vm.step(),
            Err(Fault::OutOfBoundsAddress { address: 0xFFF })
        );
    }

    #[test]
    fn timers_decay_on_ticks_and_saturate_at_zero() {
        let mut vm = Interpreter::new();
        vm.state.delay_timer = 5;
        vm.state.sound_timer = 2;
        for _ in 0..10 {
            vm.tick_60hz();
        }
        assert_eq!(vm.delay_timer(), 0);
        assert_eq!(vm.sound_timer(), 0);
    }

    #[test]
    fn steps_never_touch_the_timers() {
        let mut vm = Interpreter::new();
        vm.load_image(&[0x12, 0x00]).unwrap(); // jump to self
        vm.state.delay_timer = 5;
        for _ in 0..100 {
            vm.step().unwrap();
        }
        assert_eq!(vm.delay_timer(), 5);
    }

    #[test]
    fn redraw_flag_is_cleared_by_consuming_it() {
        let mut vm = Interpreter::new();
        vm.load_image(&[0x00, 0xE0]).unwrap();
        assert!(!vm.consume_redraw_flag());
        vm.step().unwrap();
        assert!(vm.consume_redraw_flag());
        assert!(!vm.consume_redraw_flag());
    }

    #[test]
    fn set_key_tracks_press_and_release() {
        let mut vm = Interpreter::new();
        vm.set_key(0xE, true);
        assert!(vm.state.keys[0xE]);
        vm.set_key(0xE, false);
        assert!(!vm.state.keys[0xE]);
    }

    #[test]
    fn wait_for_key_parks_until_a_press_arrives() {
        let mut vm = Interpreter::new();
        vm.load_image(&[0xF1, 0x0A, 0x62, 0x05]).unwrap();
        vm.step().unwrap();
        assert_eq!(vm.state.waiting_on_key, Some(0x1));

        // Parked: stepping goes nowhere.
        for _ in 0..3 {
            vm.step().unwrap();
        }
        assert_eq!(vm.state.pc, 0x202);

        // A release does not wake the machine; a press does.
        vm.set_key(0xB, false);
        assert_eq!(vm.state.waiting_on_key, Some(0x1));
        vm.set_key(0xB, true);
        assert_eq!(vm.state.waiting_on_key, None);
        assert_eq!(vm.state.v[0x1], 0xB);

        vm.step().unwrap();
        assert_eq!(vm.state.v[0x2], 0x05);
    }

    #[test]
    fn reset_restores_power_on_state() {
        let mut vm = Interpreter::new();
        vm.load_image(&[0x00, 0xE0]).unwrap();
        vm.step().unwrap();
        vm.set_key(0x3, true);
        vm.reset();
        assert_eq!(vm.state, State::new());
        assert_eq!(vm.state.memory.len(), MEMORY_SIZE);
    }
}
