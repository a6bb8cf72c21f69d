use sicas::{assemble_program, DiagnosticKind};

#[test]
fn copy_program() {
    let assembly = assemble_program(include_str!("../programs/copy.sic")).unwrap();
    assert!(assembly.diagnostics.is_empty());

    let symbols: Vec<_> = assembly.symbols.iter().collect();
    assert_eq!(
        symbols,
        vec![
            ("FIRST", 0x100),
            ("ENDFIL", 0x10F),
            ("EOF", 0x118),
            ("ZERO", 0x11B),
            ("LENGTH", 0x11E),
            ("BUFFER", 0x121),
        ]
    );

    assert_eq!(
        assembly.object_code,
        "HCOPY  000100001021\n\
         T0001001E00611E28611B30610F5071215471210061180C61214C0000454F46000000\n\
         E000100\n"
    );
}

#[test]
fn copy_listing() {
    let assembly = assemble_program(include_str!("../programs/copy.sic")).unwrap();
    let rows: Vec<_> = assembly.listing.lines().collect();
    assert_eq!(rows[0], "Address\tLabel\tMnemonic\tOperand\tObject Code");
    assert_eq!(rows[1], "0100\tCOPY\tSTART\t100\t");
    assert_eq!(rows[2], "0100\tFIRST\tLDA\tLENGTH\t00611E");
    assert_eq!(rows[9], "0115\t\tRSUB\t\t4C0000");
    assert_eq!(rows[10], "0118\tEOF\tBYTE\tC'EOF'\t454F46");
    assert_eq!(rows[12], "011E\tLENGTH\tRESW\t1\t");
    assert_eq!(rows[14], "1121\t\tEND\tFIRST\t");
    assert_eq!(rows.len(), 15);
}

#[test]
fn thirty_two_contiguous_bytes_split_into_two_text_records() {
    let assembly = assemble_program(include_str!("../programs/split.sic")).unwrap();
    assert!(assembly.diagnostics.is_empty());
    assert_eq!(
        assembly.object_code,
        "HSPLIT 000000000020\n\
         T0000001E00200100200200200300200400200500200600200700200800200900200A\n\
         T00001E029001\n\
         E000000\n"
    );
}

#[test]
fn org_and_equ_program() {
    let assembly = assemble_program(include_str!("../programs/tables.sic")).unwrap();
    assert!(assembly.diagnostics.is_empty());

    let rows: Vec<_> = assembly.listing.lines().collect();
    // EQU tags the line with the current address but binds the value
    assert_eq!(rows[10], "0217\tLEN\tEQU\t4\t");
    // ORG rewinds the counter; the next line lands on the redirected address
    assert_eq!(rows[12], "021B\t\tORG\tSRC\t");
    assert_eq!(rows[13], "0213\tALIAS\tWORD\t0\t000000");
}

#[test]
fn reassembly_is_byte_identical() {
    let source = include_str!("../programs/copy.sic");
    let first = assemble_program(source).unwrap();
    let second = assemble_program(source).unwrap();
    assert_eq!(first.object_code, second.object_code);
    assert_eq!(first.listing, second.listing);
}

#[test]
fn errors_are_collected_and_output_still_produced() {
    let source = "\
BAD  START 0
HERE WORD  1
HERE WORD  2
     LDA   NOWHERE
     ADDR  A,Q
     LDA   #99999
BAD2 FROB  HERE
     END   BAD";
    let assembly = assemble_program(source).unwrap();

    let kinds: Vec<_> = assembly
        .diagnostics
        .iter()
        .map(|d| d.kind.clone())
        .collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::DuplicateSymbol("HERE".to_owned()),
            DiagnosticKind::UndefinedSymbol("NOWHERE".to_owned()),
            DiagnosticKind::InvalidRegister("Q".to_owned()),
            DiagnosticKind::ImmediateOutOfRange("99999".to_owned()),
            DiagnosticKind::UnknownMnemonic("FROB".to_owned()),
        ]
    );

    // best-effort output: fallbacks are encoded, nothing is dropped
    assert_eq!(
        assembly.object_code,
        "HBAD   000000000011\n\
         T000000110000010000020060000000002000000000\n\
         E000006\n"
    );
}
