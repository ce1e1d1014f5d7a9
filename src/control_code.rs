pub const ESC: u8 = 0x1B;
pub const STX: u8 = 0x02;
pub const ETX: u8 = 0x03;
pub const CR: u8 = 0x0D;
pub const NUL: u8 = 0x00;

pub const RECEIVE_IDENTIFICATION: u8 = b'S';
pub const RECEIVE_STANDARD_TEXT: u8 = b'F';
pub const RECEIVE_TEXT: u8 = b'T';
