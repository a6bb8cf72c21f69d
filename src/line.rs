use crate::constants::{self, lit_regex};
use crate::directive::Directive;

/// One source line split into its label, mnemonic and operand columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// 1-based source line number, for diagnostics.
    pub line_no: usize,
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    pub operand: Option<String>,
}

impl ParsedLine {
    /// Split a raw line on whitespace. The first token is the mnemonic when
    /// it names a known instruction or directive, otherwise it is a label
    /// and the mnemonic is the second token. Remaining tokens are rejoined
    /// with single spaces as the operand. Blank lines yield `None`.
    pub fn from_line(line_no: usize, raw: &str) -> Option<Self> {
        let mut tokens = raw.split_whitespace();
        let first = tokens.next()?;

        let (label, mnemonic) = if is_mnemonic(first) {
            (None, Some(first.to_owned()))
        } else {
            (Some(first.to_owned()), tokens.next().map(str::to_owned))
        };

        let rest = tokens.collect::<Vec<_>>().join(" ");
        let operand = if rest.is_empty() { None } else { Some(rest) };

        Some(Self {
            line_no,
            label,
            mnemonic,
            operand,
        })
    }

    pub fn operand(&self) -> &str {
        self.operand.as_deref().unwrap_or("")
    }
}

fn is_mnemonic(token: &str) -> bool {
    constants::opcode(token).is_some() || Directive::from_str(token).is_some()
}

/// A parsed line with its assigned address. Pass one creates these, pass two
/// fills in `object_code` (empty when the line stores no bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledLine {
    pub line_no: usize,
    pub address: u32,
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    pub operand: Option<String>,
    pub object_code: String,
}

impl AssembledLine {
    pub fn new(parsed: ParsedLine, address: u32) -> Self {
        Self {
            line_no: parsed.line_no,
            address,
            label: parsed.label,
            mnemonic: parsed.mnemonic,
            operand: parsed.operand,
            object_code: String::new(),
        }
    }

    pub fn operand(&self) -> &str {
        self.operand.as_deref().unwrap_or("")
    }

    pub fn byte_len(&self) -> usize {
        self.object_code.len() / 2
    }
}

/// A `BYTE` operand: `C'...'` stores the characters, `X'...'` stores the
/// hex digits verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteLiteral {
    Chars(String),
    Hex(String),
}

impl ByteLiteral {
    pub fn parse(operand: &str) -> Option<Self> {
        let captures = lit_regex().captures(operand)?;
        if let Some(bytes) = captures.name("bytes") {
            Some(Self::Hex(bytes.as_str().to_owned()))
        } else {
            captures
                .name("chars")
                .map(|chars| Self::Chars(chars.as_str().to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ParsedLine {
        ParsedLine::from_line(1, raw).unwrap()
    }

    #[test]
    fn labeled_line() {
        let line = parse("FIRST   LDA    LENGTH");
        assert_eq!(line.label.as_deref(), Some("FIRST"));
        assert_eq!(line.mnemonic.as_deref(), Some("LDA"));
        assert_eq!(line.operand.as_deref(), Some("LENGTH"));
    }

    #[test]
    fn unlabeled_line() {
        let line = parse("   STCH   BUFFER,X");
        assert_eq!(line.label, None);
        assert_eq!(line.mnemonic.as_deref(), Some("STCH"));
        assert_eq!(line.operand.as_deref(), Some("BUFFER,X"));
    }

    #[test]
    fn directive_without_label() {
        let line = parse("RESW 10");
        assert_eq!(line.label, None);
        assert_eq!(line.mnemonic.as_deref(), Some("RESW"));
        assert_eq!(line.operand.as_deref(), Some("10"));
    }

    #[test]
    fn operand_tokens_rejoin_with_single_spaces() {
        let line = parse("HERE  EQU   VALUE   +   2");
        assert_eq!(line.operand.as_deref(), Some("VALUE + 2"));
    }

    #[test]
    fn label_without_mnemonic() {
        let line = parse("ORPHAN");
        assert_eq!(line.label.as_deref(), Some("ORPHAN"));
        assert_eq!(line.mnemonic, None);
        assert_eq!(line.operand, None);
    }

    #[test]
    fn blank_line_is_skipped() {
        assert_eq!(ParsedLine::from_line(1, "   \t  "), None);
    }

    #[test]
    fn byte_literals() {
        assert_eq!(
            ByteLiteral::parse("C'EOF'"),
            Some(ByteLiteral::Chars("EOF".to_owned()))
        );
        assert_eq!(
            ByteLiteral::parse("X'f1'"),
            Some(ByteLiteral::Hex("f1".to_owned()))
        );
        assert_eq!(ByteLiteral::parse("X'QQ'"), None);
        assert_eq!(ByteLiteral::parse("C'EOF"), None);
        assert_eq!(ByteLiteral::parse("42"), None);
    }
}
