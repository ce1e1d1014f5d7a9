//! Driver for the MagicBall serial flip display.
//!
//! Every byte sent to the display has to be echoed back before the next one
//! may follow. Replies are read byte by byte until the ETX terminator.
//!
//! ```no_run
//! use magicball_driver::DeviceClient;
//!
//! let mut client = DeviceClient::open("/dev/ttyUSB0").unwrap();
//! println!("{}", client.receive_identification().unwrap());
//! client.send_text("Linie 7").unwrap();
//! ```

use std::io::{Read, Write};
use std::time::Duration;

use log::{debug, warn};
use serialport::SerialPort;

pub mod codec;
pub mod control_code;
pub mod cp437;
mod debug;
mod error;
mod identification;
pub mod serial;
#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use identification::Identification;
pub use serial::{open_port, PortSettings};

/// Outcome of writing a text and reading it back.
#[derive(Clone, Debug, PartialEq)]
pub enum TextVerification {
    Matched,
    /// The display holds something else than what was sent.
    Mismatch { read_back: String },
}

/// Owns the port for the whole session. Dropping the client closes it.
pub struct DeviceClient<P: Read + Write> {
    port: P,
    inter_char_pause: Duration,
}

impl DeviceClient<Box<dyn SerialPort>> {
    /// Opens `path` with the display's fixed line settings.
    pub fn open(path: &str) -> Result<Self> {
        Self::open_with(path, &PortSettings::default())
    }

    pub fn open_with(path: &str, settings: &PortSettings) -> Result<Self> {
        let port = open_port(path, settings)?;
        Ok(DeviceClient::new(port, settings.inter_char_pause))
    }
}

impl<P: Read + Write> DeviceClient<P> {
    pub fn new(port: P, inter_char_pause: Duration) -> Self {
        DeviceClient {
            port,
            inter_char_pause,
        }
    }

    pub fn into_inner(self) -> P {
        self.port
    }

    fn write_byte(&mut self, byte: u8) -> Result<u8> {
        serial::write_byte_check_echo(&mut self.port, byte, None, self.inter_char_pause)
    }

    fn write_all_checked(&mut self, data: &[u8]) -> Result<()> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    fn request(&mut self, frame: &[u8]) -> Result<Vec<u8>> {
        self.write_all_checked(frame)?;
        serial::read_until(&mut self.port, control_code::ETX)
    }

    pub fn receive_identification(&mut self) -> Result<Identification> {
        debug!("Receiving identification");
        let raw = self.request(&codec::identification_request())?;
        codec::parse_identification(&raw)
    }

    pub fn receive_standard_text(&mut self) -> Result<String> {
        debug!("Receiving standard text");
        let raw = self.request(&codec::standard_text_request())?;
        Ok(codec::decode_text_response(&raw))
    }

    pub fn receive_text(&mut self) -> Result<String> {
        debug!("Receiving text");
        let raw = self.request(&codec::text_request())?;
        Ok(codec::decode_text_response(&raw))
    }

    /// Writes `text` to the display.
    ///
    /// Once the first byte is out the frame is always closed with ETX, even
    /// when a byte of the body was not echoed correctly. The first failure is
    /// the one reported.
    pub fn send_text(&mut self, text: &str) -> Result<()> {
        debug!("Sending text {:?}", text);
        let body = codec::send_text_body(text)?;
        let sent = self.write_all_checked(&body);
        let closed = self.write_byte(codec::send_text_terminator());
        match (sent, closed) {
            (Err(e), Err(closing)) => {
                warn!("Failed to close the text frame after an error: {}", closing);
                Err(e)
            }
            (Err(e), Ok(_)) => Err(e),
            (Ok(()), Err(e)) => Err(e),
            (Ok(()), Ok(_)) => Ok(()),
        }
    }

    /// Writes `text` and reads it back.
    pub fn send_text_verified(&mut self, text: &str) -> Result<TextVerification> {
        self.send_text(text)?;
        let read_back = self.receive_text()?;
        if read_back == text {
            return Ok(TextVerification::Matched);
        }
        warn!("Sent {:?} but the display reads {:?}", text, read_back);
        Ok(TextVerification::Mismatch { read_back })
    }
}
