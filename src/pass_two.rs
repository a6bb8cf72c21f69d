use crate::constants::{self, Format, OpCode};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::directive::Directive;
use crate::line::{AssembledLine, ByteLiteral};
use crate::pass_one::PassOne;
use crate::symbols::SymbolTable;

/// Pass-one output with every line's object code filled in.
#[derive(Debug)]
pub struct PassTwo {
    pub lines: Vec<AssembledLine>,
    pub symbols: SymbolTable,
    pub start_addr: u32,
    pub program_length: u32,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve every operand against the complete symbol table and encode each
/// line. Errors degrade to zeroed fallbacks and are accumulated.
pub fn pass_two(pass_one: PassOne) -> PassTwo {
    let PassOne {
        mut lines,
        symbols,
        start_addr,
        program_length,
        mut diagnostics,
    } = pass_one;

    let mut encoder = Encoder {
        symbols: &symbols,
        diagnostics: Vec::new(),
    };
    for line in &mut lines {
        line.object_code = encoder.encode_line(line);
    }
    diagnostics.append(&mut encoder.diagnostics);

    PassTwo {
        lines,
        symbols,
        start_addr,
        program_length,
        diagnostics,
    }
}

struct Encoder<'a> {
    symbols: &'a SymbolTable,
    diagnostics: Vec<Diagnostic>,
}

impl Encoder<'_> {
    fn encode_line(&mut self, line: &AssembledLine) -> String {
        let Some(mnemonic) = line.mnemonic.as_deref() else {
            return String::new();
        };

        if let Some(directive) = Directive::from_str(mnemonic) {
            return match directive {
                Directive::BYTE => Self::encode_byte(line),
                Directive::WORD => Self::encode_word(line),
                // START/END/CSECT/ORG/EQU and reserved storage emit nothing
                _ => String::new(),
            };
        }

        let Some(op) = constants::opcode(mnemonic) else {
            self.error(line, DiagnosticKind::UnknownMnemonic(mnemonic.to_owned()));
            return "000000".to_owned();
        };

        match op.format {
            Format::One => format!("{:02X}0000", op.opcode),
            Format::Two => self.encode_registers(op, line),
            Format::Three => self.encode_memory(op, line),
        }
    }

    fn encode_byte(line: &AssembledLine) -> String {
        match ByteLiteral::parse(line.operand()) {
            Some(ByteLiteral::Chars(chars)) => {
                chars.bytes().map(|b| format!("{b:02X}")).collect()
            }
            Some(ByteLiteral::Hex(digits)) => digits.to_ascii_uppercase(),
            // already reported by pass one
            None => String::new(),
        }
    }

    fn encode_word(line: &AssembledLine) -> String {
        let value = line.operand().parse::<i64>().unwrap_or(0);
        format!("{:06X}", value & 0xFF_FFFF)
    }

    fn encode_registers(&mut self, op: OpCode, line: &AssembledLine) -> String {
        let operand = line.operand();
        let (first, second) = match operand.split_once(',') {
            Some((r1, r2)) => (r1.trim(), Some(r2.trim())),
            None => (operand.trim(), None),
        };

        let Some(r1) = constants::register(first) else {
            self.error(line, DiagnosticKind::InvalidRegister(first.to_owned()));
            return "0000".to_owned();
        };
        let r2 = match second {
            Some(name) => match constants::register(name) {
                Some(code) => code,
                None => {
                    self.error(line, DiagnosticKind::InvalidRegister(name.to_owned()));
                    return "0000".to_owned();
                }
            },
            None => 0,
        };

        format!("{:02X}{r1:X}{r2:X}", op.opcode)
    }

    fn encode_memory(&mut self, op: OpCode, line: &AssembledLine) -> String {
        let operand = line.operand();
        // nibble = n*4 + i*2 + x
        let (nibble, address) = if let Some(target) = operand.strip_prefix('#') {
            (2, self.immediate(target, line))
        } else if let Some(target) = operand.strip_prefix('@') {
            (4, self.resolve(target, line))
        } else {
            let (target, indexed) = match operand.strip_suffix(",X") {
                Some(stripped) => (stripped, true),
                None => (operand, false),
            };
            (6 + u32::from(indexed), self.resolve(target, line))
        };

        format!("{:02X}{nibble:X}{:03X}", op.opcode, address & 0xFFF)
    }

    fn immediate(&mut self, target: &str, line: &AssembledLine) -> u32 {
        let value = if !target.is_empty() && target.chars().all(|c| c.is_ascii_digit()) {
            target.parse::<u32>().unwrap_or(u32::MAX)
        } else {
            self.resolve(target, line)
        };
        // the operand field holds twelve bits, resolved or literal
        if value > 0xFFF {
            self.error(
                line,
                DiagnosticKind::ImmediateOutOfRange(target.to_owned()),
            );
            return 0;
        }
        value
    }

    fn resolve(&mut self, symbol: &str, line: &AssembledLine) -> u32 {
        match self.symbols.resolve(symbol) {
            Some(address) => address,
            None => {
                self.error(line, DiagnosticKind::UndefinedSymbol(symbol.to_owned()));
                0
            }
        }
    }

    fn error(&mut self, line: &AssembledLine, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::new(line.line_no, kind));
    }
}
