use std::fmt;

use crate::control_code::NUL;
use crate::cp437;
use crate::error::{Error, Result};

pub const N_FIELDS: usize = 12;

const VERSION: usize = 0;
const MANUFACTURER: usize = 1;
const SERIAL: usize = 6;
const STANDARD_TEXT: [usize; 2] = [7, 8];
const FONT: [usize; 2] = [9, 10];
const MEMORY: usize = 11;

/// Identification record reported by the display.
#[derive(Clone, Debug, PartialEq)]
pub struct Identification {
    pub version: String,
    pub manufacturer: String,
    pub serial: String,
    /// The two standard text fields joined by `" / "`.
    pub standard_text: String,
    /// The two font fields joined by `" / "`.
    pub font: String,
    /// Memory size, transmitted as hexadecimal text.
    pub memory: u64,
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Version: {}, Manufacturer: {}, Serial: {}, Standard Text: {}, Font: {}, Memory: {}",
            self.version, self.manufacturer, self.serial, self.standard_text, self.font, self.memory
        )
    }
}

fn split_fields(raw: &[u8]) -> Vec<&[u8]> {
    let mut fields: Vec<&[u8]> = raw.split(|&b| b == NUL).collect();
    // whatever follows the last NUL is the trailer, not a field
    fields.pop();
    fields
}

fn join_pair(fields: &[&[u8]], indices: [usize; 2]) -> String {
    format!(
        "{} / {}",
        cp437::decode(fields[indices[0]]),
        cp437::decode(fields[indices[1]])
    )
}

fn parse_memory(field: &str) -> Result<u64> {
    let trimmed = field.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u64::from_str_radix(digits, 16).map_err(|e| {
        Error::MalformedResponse(format!(
            "Memory field {:?} is not hexadecimal: {}",
            field, e
        ))
    })
}

/// Decodes the NUL separated identification frame, terminator included.
pub fn parse_identification(raw: &[u8]) -> Result<Identification> {
    let fields = split_fields(raw);
    if fields.len() < N_FIELDS {
        return Err(Error::MalformedResponse(format!(
            "Identification must have at least {} fields. Actually {} fields.",
            N_FIELDS,
            fields.len()
        )));
    }

    Ok(Identification {
        version: cp437::decode(fields[VERSION]),
        manufacturer: cp437::decode(fields[MANUFACTURER]),
        serial: cp437::decode(fields[SERIAL]),
        standard_text: join_pair(&fields, STANDARD_TEXT),
        font: join_pair(&fields, FONT),
        memory: parse_memory(&cp437::decode(fields[MEMORY]))?,
    })
}
