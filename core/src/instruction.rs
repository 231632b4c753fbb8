use crate::error::Fault;
use crate::opcode::Opcode;
use crate::operations as ops;
use crate::state::State;

/// An executable instruction selected by decode.
pub(crate) type Operation = fn(&mut State, Opcode) -> Result<(), Fault>;

/// Classify an opcode by its high nibble, then by its low byte or low
/// nibble where the high nibble is ambiguous (0x0, 0x8, 0xE, 0xF).
///
/// Decode happens before any state is touched: a word that matches no
/// pattern faults with the machine exactly as it was at fetch time.
/// This covers the whole 35-instruction set; 0nnn machine-code calls
/// match nothing and fault.
pub(crate) fn decode(op: Opcode) -> Result<Operation, Fault> {
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => Ok(ops::cls),
        (0x0, 0x0, 0xE, 0xE) => Ok(ops::ret),
        (0x1, ..) => Ok(ops::jp),
        (0x2, ..) => Ok(ops::call),
        (0x3, ..) => Ok(ops::se_byte),
        (0x4, ..) => Ok(ops::sne_byte),
        (0x5, _, _, 0x0) => Ok(ops::se_reg),
        (0x6, ..) => Ok(ops::ld_byte),
        (0x7, ..) => Ok(ops::add_byte),
        (0x8, _, _, 0x0) => Ok(ops::ld_reg),
        (0x8, _, _, 0x1) => Ok(ops::or),
        (0x8, _, _, 0x2) => Ok(ops::and),
        (0x8, _, _, 0x3) => Ok(ops::xor),
        (0x8, _, _, 0x4) => Ok(ops::add_reg),
        (0x8, _, _, 0x5) => Ok(ops::sub),
        (0x8, _, _, 0x6) => Ok(ops::shr),
        (0x8, _, _, 0x7) => Ok(ops::subn),
        (0x8, _, _, 0xE) => Ok(ops::shl),
        (0x9, _, _, 0x0) => Ok(ops::sne_reg),
        (0xA, ..) => Ok(ops::ld_i),
        (0xB, ..) => Ok(ops::jp_v0),
        (0xC, ..) => Ok(ops::rnd),
        (0xD, ..) => Ok(ops::drw),
        (0xE, _, 0x9, 0xE) => Ok(ops::skp),
        (0xE, _, 0xA, 0x1) => Ok(ops::sknp),
        (0xF, _, 0x0, 0x7) => Ok(ops::ld_from_dt),
        (0xF, _, 0x0, 0xA) => Ok(ops::ld_key),
        (0xF, _, 0x1, 0x5) => Ok(ops::ld_dt),
        (0xF, _, 0x1, 0x8) => Ok(ops::ld_st),
        (0xF, _, 0x1, 0xE) => Ok(ops::add_i),
        (0xF, _, 0x2, 0x9) => Ok(ops::ld_font),
        (0xF, _, 0x3, 0x3) => Ok(ops::ld_bcd),
        (0xF, _, 0x5, 0x5) => Ok(ops::store_regs),
        (0xF, _, 0x6, 0x5) => Ok(ops::load_regs),
        _ => Err(Fault::UnsupportedOpcode { opcode: op.word() }),
    }
}
