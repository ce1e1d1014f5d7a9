/// Renders a frame as space separated hex bytes for trace output.
pub fn hex_dump(frame: &[u8]) -> String {
    frame
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Names the control characters that show up in frames, `None` for anything else.
pub fn control_name(byte: u8) -> Option<&'static str> {
    use crate::control_code::*;
    match byte {
        ESC => Some("ESC"),
        STX => Some("STX"),
        ETX => Some("ETX"),
        CR => Some("CR"),
        NUL => Some("NUL"),
        _ => None,
    }
}

/// Human readable form of a single byte, used when logging echoes.
pub fn describe_byte(byte: u8) -> String {
    match control_name(byte) {
        Some(name) => format!("{:02X} ({})", byte, name),
        None if byte.is_ascii_graphic() || byte == b' ' => {
            format!("{:02X} '{}'", byte, byte as char)
        }
        None => format!("{:02X}", byte),
    }
}
