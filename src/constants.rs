use std::collections::HashMap;

use once_cell::sync::OnceCell;
use regex::Regex;

/// Encoded width class of an instruction.
///
/// `One` is the fixed no-operand pattern (RSUB), `Two` packs two 4-bit
/// register codes, `Three` packs an addressing nibble and a 12-bit address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    One,
    Two,
    Three,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCode {
    pub opcode: u8,
    pub format: Format,
}

static OPCODES: OnceCell<HashMap<&'static str, OpCode>> = OnceCell::new();
static REGISTERS: OnceCell<HashMap<&'static str, u8>> = OnceCell::new();
static LIT_REGEX: OnceCell<Regex> = OnceCell::new();
static LIT_REGEX_PATTERN: &str = r"^(?:X'(?P<bytes>[0-9a-fA-F]+)'|C'(?P<chars>[^']+)')$";

/// Look up a mnemonic in the instruction catalog. Case-sensitive, exact match.
pub fn opcode(mnemonic: &str) -> Option<OpCode> {
    OPCODES
        .get_or_init(|| {
            use Format::{One, Three, Two};
            [
                ("LDA", 0x00, Three),
                ("LDX", 0x04, Three),
                ("LDL", 0x08, Three),
                ("STA", 0x0C, Three),
                ("STX", 0x10, Three),
                ("STL", 0x14, Three),
                ("ADD", 0x18, Three),
                ("SUB", 0x1C, Three),
                ("MUL", 0x20, Three),
                ("DIV", 0x24, Three),
                ("COMP", 0x28, Three),
                ("TIX", 0x2C, Three),
                ("JEQ", 0x30, Three),
                ("JGT", 0x34, Three),
                ("JLT", 0x38, Three),
                ("J", 0x3C, Three),
                ("AND", 0x40, Three),
                ("OR", 0x44, Three),
                ("JSUB", 0x48, Three),
                ("RSUB", 0x4C, One),
                ("LDCH", 0x50, Three),
                ("STCH", 0x54, Three),
                ("LDB", 0x68, Three),
                ("LDS", 0x6C, Three),
                ("LDT", 0x74, Three),
                ("STB", 0x78, Three),
                ("STS", 0x7C, Three),
                ("STT", 0x84, Three),
                ("RD", 0xD8, Three),
                ("WD", 0xDC, Three),
                ("TD", 0xE0, Three),
                ("STSW", 0xE8, Three),
                ("ADDR", 0x90, Two),
                ("SUBR", 0x94, Two),
                ("MULR", 0x98, Two),
                ("DIVR", 0x9C, Two),
                ("COMPR", 0xA0, Two),
                ("SHIFTL", 0xA4, Two),
                ("SHIFTR", 0xA8, Two),
                ("RMO", 0xAC, Two),
                ("CLEAR", 0xB4, Two),
                ("TIXR", 0xB8, Two),
            ]
            .into_iter()
            .map(|(mnemonic, opcode, format)| (mnemonic, OpCode { opcode, format }))
            .collect()
        })
        .get(mnemonic)
        .copied()
}

/// Look up a register name, returning its 4-bit code.
pub fn register(name: &str) -> Option<u8> {
    REGISTERS
        .get_or_init(|| {
            [
                ("A", 0x0),
                ("X", 0x1),
                ("L", 0x2),
                ("B", 0x3),
                ("S", 0x4),
                ("T", 0x5),
                ("F", 0x6),
                ("PC", 0x8),
                ("SW", 0x9),
            ]
            .into()
        })
        .get(name)
        .copied()
}

pub fn lit_regex() -> &'static Regex {
    LIT_REGEX.get_or_init(|| Regex::new(LIT_REGEX_PATTERN).expect("Invalid literal regex"))
}
