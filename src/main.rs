use std::{env, fs, process};

use anyhow::{Context, Result};
use sicas::assemble_program;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <input.asm> <output.obj> <output.lst>", args[0]);
        process::exit(1);
    }

    let program_text =
        fs::read_to_string(&args[1]).with_context(|| format!("can't read {}", args[1]))?;

    let assembly = assemble_program(&program_text)?;

    fs::write(&args[2], &assembly.object_code)
        .with_context(|| format!("can't write {}", args[2]))?;
    fs::write(&args[3], &assembly.listing)
        .with_context(|| format!("can't write {}", args[3]))?;

    for diagnostic in &assembly.diagnostics {
        eprintln!("Error: {}", diagnostic);
    }
    if assembly.diagnostics.is_empty() {
        println!("Assembly completed.");
    } else {
        println!("Assembly failed: {} error(s).", assembly.diagnostics.len());
        process::exit(1);
    }

    Ok(())
}
