//! Frame construction and text decoding, no I/O.

use crate::control_code::{
    CR, ESC, ETX, RECEIVE_IDENTIFICATION, RECEIVE_STANDARD_TEXT, RECEIVE_TEXT, STX,
};
use crate::cp437;
use crate::error::Result;

pub use crate::identification::parse_identification;

/// Number of bytes closing a text response: one trailer byte plus ETX.
pub const TEXT_TRAILER_SIZE: usize = 2;

fn command_frame(command: u8) -> [u8; 3] {
    [ESC, command, ETX]
}

pub fn identification_request() -> [u8; 3] {
    command_frame(RECEIVE_IDENTIFICATION)
}

pub fn standard_text_request() -> [u8; 3] {
    command_frame(RECEIVE_STANDARD_TEXT)
}

pub fn text_request() -> [u8; 3] {
    command_frame(RECEIVE_TEXT)
}

/// Body of a text frame: STX, CR and the encoded text.
///
/// The closing ETX is not part of the body. The caller sends it separately
/// so that it goes out even when the body fails halfway.
pub fn send_text_body(text: &str) -> Result<Vec<u8>> {
    let payload = cp437::encode(text)?;
    let mut body = Vec::with_capacity(payload.len() + 2);
    body.push(STX);
    body.push(CR);
    body.extend(payload);
    Ok(body)
}

pub fn send_text_terminator() -> u8 {
    ETX
}

/// Drops the two byte trailer and decodes the rest.
pub fn decode_text_response(raw: &[u8]) -> String {
    let end = raw.len().saturating_sub(TEXT_TRAILER_SIZE);
    cp437::decode(&raw[..end])
}
