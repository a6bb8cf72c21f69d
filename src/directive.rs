#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    START,
    END,
    BYTE,
    WORD,
    RESW,
    RESB,
    ORG,
    EQU,
    CSECT,
}

impl Directive {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "START" => Some(Self::START),
            "END" => Some(Self::END),
            "BYTE" => Some(Self::BYTE),
            "WORD" => Some(Self::WORD),
            "RESW" => Some(Self::RESW),
            "RESB" => Some(Self::RESB),
            "ORG" => Some(Self::ORG),
            "EQU" => Some(Self::EQU),
            "CSECT" => Some(Self::CSECT),
            _ => None,
        }
    }
}
