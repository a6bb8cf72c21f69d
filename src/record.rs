use std::fmt::Display;

use crate::directive::Directive;
use crate::line::AssembledLine;

/// One text record holds at most this many object bytes.
pub const MAX_TEXT_BYTES: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub address: u32,
    /// Hex-digit payload, two digits per byte.
    pub code: String,
}

impl Text {
    pub fn new(address: u32) -> Self {
        Self {
            address,
            code: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.code.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Header {
        name: String,
        start: u32,
        length: u32,
    },
    Text(Text),
    End {
        first_instruction: u32,
    },
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Header {
                name,
                start,
                length,
            } => {
                write!(f, "H{name:<6}{start:0>6X}{length:0>6X}")
            }
            Record::Text(text) => {
                write!(f, "T{:0>6X}{:0>2X}{}", text.address, text.len(), text.code)
            }
            Record::End { first_instruction } => write!(f, "E{first_instruction:0>6X}"),
        }
    }
}

/// Packs encoded lines into header, text and end records, keeping every text
/// record within the byte limit and contiguous in address.
pub struct ObjectWriter {
    records: Vec<Record>,
    current: Option<Text>,
}

impl ObjectWriter {
    pub fn write(lines: &[AssembledLine], start_addr: u32, program_length: u32) -> Vec<Record> {
        let name = lines
            .first()
            .and_then(|line| line.label.as_deref())
            .unwrap_or("")
            .chars()
            .take(6)
            .collect();

        let mut writer = Self {
            records: vec![Record::Header {
                name,
                start: start_addr,
                length: program_length,
            }],
            current: None,
        };

        for line in lines {
            writer.add_line(line);
        }
        writer.flush();

        writer.records.push(Record::End {
            first_instruction: first_instruction(lines).unwrap_or(start_addr),
        });

        writer.records
    }

    fn add_line(&mut self, line: &AssembledLine) {
        if line.object_code.is_empty() {
            // reserved storage breaks contiguity
            self.flush();
            return;
        }

        let mut text = self.current.take().unwrap_or_else(|| Text::new(line.address));
        if text.len() + line.byte_len() > MAX_TEXT_BYTES && !text.is_empty() {
            self.records.push(Record::Text(text));
            text = Text::new(line.address);
        }

        // a payload bigger than a whole record is split across records
        let mut code = line.object_code.as_str();
        let mut address = line.address;
        while text.len() + code.len() / 2 > MAX_TEXT_BYTES {
            let room = (MAX_TEXT_BYTES - text.len()) * 2;
            let (head, tail) = code.split_at(room);
            text.code.push_str(head);
            address += (room / 2) as u32;
            self.records.push(Record::Text(text));
            text = Text::new(address);
            code = tail;
        }
        text.code.push_str(code);

        self.current = Some(text);
    }

    fn flush(&mut self) {
        if let Some(text) = self.current.take() {
            if !text.is_empty() {
                self.records.push(Record::Text(text));
            }
        }
    }
}

fn first_instruction(lines: &[AssembledLine]) -> Option<u32> {
    lines
        .iter()
        .find(|line| {
            !line.object_code.is_empty()
                && line
                    .mnemonic
                    .as_deref()
                    .map_or(false, |m| Directive::from_str(m).is_none())
        })
        .map(|line| line.address)
}
