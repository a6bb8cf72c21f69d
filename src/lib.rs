use anyhow::Result;
use std::fmt::Write;

mod constants;
mod diagnostics;
mod directive;
mod line;
mod listing;
mod pass_one;
mod pass_two;
mod record;
mod symbols;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use symbols::SymbolTable;

use pass_one::FirstPass;
use pass_two::pass_two;
use record::ObjectWriter;

/// A fully assembled program: the object-file text, the listing text and
/// every diagnostic accumulated across both passes.
#[derive(Debug)]
pub struct Assembly {
    pub object_code: String,
    pub listing: String,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Assemble a SIC program from text.
///
/// Malformed lines degrade to diagnostics with zeroed fallback encodings, so
/// the output is always complete; callers decide what a non-empty diagnostic
/// list means for them.
///
/// # Errors
///
/// Only on formatting failures while rendering the output text.
pub fn assemble_program(program_text: &str) -> Result<Assembly> {
    let pass_one = FirstPass::assign(program_text);
    let pass_two = pass_two(pass_one);

    let records = ObjectWriter::write(
        &pass_two.lines,
        pass_two.start_addr,
        pass_two.program_length,
    );

    let mut object_code = String::new();
    for record in records {
        writeln!(&mut object_code, "{}", record)?;
    }

    let listing = listing::listing(&pass_two.lines)?;

    Ok(Assembly {
        object_code,
        listing,
        symbols: pass_two.symbols,
        diagnostics: pass_two.diagnostics,
    })
}
