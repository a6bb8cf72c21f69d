use crate::constants::{self, Format};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::directive::Directive;
use crate::line::{AssembledLine, ByteLiteral, ParsedLine};
use crate::symbols::SymbolTable;

/// Everything pass one produces: the address-tagged lines, the finalized
/// symbol table, and the program's start address and length.
#[derive(Debug)]
pub struct PassOne {
    pub lines: Vec<AssembledLine>,
    pub symbols: SymbolTable,
    pub start_addr: u32,
    pub program_length: u32,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct FirstPass {
    location: u32,
    start_addr: u32,
    start_found: bool,
    program_length: Option<u32>,
    symbols: SymbolTable,
    diagnostics: Vec<Diagnostic>,
}

impl FirstPass {
    fn new() -> Self {
        Self {
            location: 0,
            start_addr: 0,
            start_found: false,
            program_length: None,
            symbols: SymbolTable::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Walk the source once, assigning each non-blank line an address and
    /// registering every label at the address its line occupies.
    pub fn assign(program_text: &str) -> PassOne {
        let mut pass = Self::new();
        let lines = program_text
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| ParsedLine::from_line(idx + 1, raw))
            .map(|parsed| pass.assign_line(parsed))
            .collect();

        let program_length = pass
            .program_length
            .unwrap_or_else(|| pass.location.saturating_sub(pass.start_addr));

        PassOne {
            lines,
            symbols: pass.symbols,
            start_addr: pass.start_addr,
            program_length,
            diagnostics: pass.diagnostics,
        }
    }

    fn assign_line(&mut self, parsed: ParsedLine) -> AssembledLine {
        // The first START fixes the load address. Its label names the
        // program and is not a symbol.
        if !self.start_found && parsed.mnemonic.as_deref() == Some("START") {
            self.location = u32::from_str_radix(parsed.operand(), 16).unwrap_or(0);
            self.start_addr = self.location;
            self.start_found = true;
            return AssembledLine::new(parsed, self.location);
        }

        let address = self.location;
        let directive = parsed.mnemonic.as_deref().and_then(Directive::from_str);

        if let Some(label) = parsed.label.as_deref() {
            // EQU defines its label from the operand instead of the counter.
            if directive != Some(Directive::EQU) {
                self.define(label, address, parsed.line_no);
            }
        }

        let Some(mnemonic) = parsed.mnemonic.as_deref() else {
            let label = parsed.label.clone().unwrap_or_default();
            self.error(parsed.line_no, DiagnosticKind::MissingMnemonic(label));
            return AssembledLine::new(parsed, address);
        };

        match directive {
            Some(Directive::START | Directive::CSECT) => {}
            Some(Directive::END) => {
                self.program_length = Some(self.location.saturating_sub(self.start_addr));
            }
            Some(Directive::BYTE) => {
                let size = self.byte_length(&parsed);
                self.location += size;
            }
            Some(Directive::WORD) => self.location += 3,
            Some(Directive::RESW) => {
                self.location += 3 * parsed.operand().parse::<u32>().unwrap_or(0);
            }
            Some(Directive::RESB) => {
                self.location += parsed.operand().parse::<u32>().unwrap_or(0);
            }
            Some(Directive::ORG) => self.org(&parsed),
            Some(Directive::EQU) => self.equ(&parsed),
            None => {
                // Unknown mnemonics still occupy a zeroed three-byte slot so
                // later addresses stay consistent with pass two's fallback.
                self.location += match constants::opcode(mnemonic).map(|op| op.format) {
                    Some(Format::Two) => 2,
                    _ => 3,
                };
            }
        }

        AssembledLine::new(parsed, address)
    }

    fn byte_length(&mut self, parsed: &ParsedLine) -> u32 {
        match ByteLiteral::parse(parsed.operand()) {
            Some(ByteLiteral::Chars(chars)) => chars.len() as u32,
            Some(ByteLiteral::Hex(digits)) => {
                if digits.len() % 2 != 0 {
                    self.error(
                        parsed.line_no,
                        DiagnosticKind::MalformedByteLiteral(parsed.operand().to_owned()),
                    );
                }
                (digits.len() / 2) as u32
            }
            None => {
                self.error(
                    parsed.line_no,
                    DiagnosticKind::MalformedByteLiteral(parsed.operand().to_owned()),
                );
                0
            }
        }
    }

    // ORG redirects the counter with no restore point.
    fn org(&mut self, parsed: &ParsedLine) {
        let operand = parsed.operand();
        if let Some(address) = self.symbols.resolve(operand) {
            self.location = address;
        } else if let Ok(address) = u32::from_str_radix(operand, 16) {
            self.location = address;
        } else {
            self.error(
                parsed.line_no,
                DiagnosticKind::UndefinedSymbol(operand.to_owned()),
            );
        }
    }

    fn equ(&mut self, parsed: &ParsedLine) {
        let Some(label) = parsed.label.clone() else {
            return;
        };
        let operand = parsed.operand();
        let value = if !operand.is_empty() && operand.chars().all(|c| c.is_ascii_digit()) {
            operand.parse().unwrap_or(0)
        } else if let Some(address) = self.symbols.resolve(operand) {
            address
        } else {
            self.error(
                parsed.line_no,
                DiagnosticKind::UndefinedSymbol(operand.to_owned()),
            );
            0
        };
        self.define(&label, value, parsed.line_no);
    }

    fn define(&mut self, name: &str, address: u32, line_no: usize) {
        if !self.symbols.define(name, address) {
            self.error(line_no, DiagnosticKind::DuplicateSymbol(name.to_owned()));
        }
    }

    fn error(&mut self, line_no: usize, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::new(line_no, kind));
    }
}
