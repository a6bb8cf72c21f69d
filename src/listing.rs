use std::fmt::Write;

use anyhow::Result;

use crate::line::AssembledLine;

/// Tab-separated column dump of the pass-two output, one row per line.
pub fn listing(lines: &[AssembledLine]) -> Result<String> {
    let mut out = String::from("Address\tLabel\tMnemonic\tOperand\tObject Code\n");
    for line in lines {
        writeln!(
            &mut out,
            "{:04X}\t{}\t{}\t{}\t{}",
            line.address,
            line.label.as_deref().unwrap_or(""),
            line.mnemonic.as_deref().unwrap_or(""),
            line.operand.as_deref().unwrap_or(""),
            line.object_code,
        )?;
    }
    Ok(out)
}
