use log::trace;
use serialport::{DataBits, Parity, SerialPort, StopBits};
use std::io;
use std::io::{Read, Write};
use std::time::Duration;

use crate::debug;
use crate::error::{Error, Result};

pub const DEFAULT_BAUD_RATE: u32 = 4800;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
// the display drops characters when they arrive back to back
pub const DEFAULT_INTER_CHAR_PAUSE: Duration = Duration::from_millis(10);

/// Line settings of the display.
#[derive(Clone, Debug, PartialEq)]
pub struct PortSettings {
    pub baud_rate: u32,
    pub parity: Parity,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    /// Upper bound for every single byte read.
    pub timeout: Duration,
    /// Pause inserted before and after every byte written.
    pub inter_char_pause: Duration,
}

impl Default for PortSettings {
    fn default() -> Self {
        PortSettings {
            baud_rate: DEFAULT_BAUD_RATE,
            parity: Parity::Even,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            timeout: DEFAULT_TIMEOUT,
            inter_char_pause: DEFAULT_INTER_CHAR_PAUSE,
        }
    }
}

pub fn open_port(path: &str, settings: &PortSettings) -> Result<Box<dyn SerialPort>> {
    serialport::new(path, settings.baud_rate)
        .parity(settings.parity)
        .data_bits(settings.data_bits)
        .stop_bits(settings.stop_bits)
        .timeout(settings.timeout)
        .open()
        .map_err(|e| Error::Open {
            path: path.to_string(),
            source: e,
        })
}

fn sleep(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}

/// Reads a single byte. `None` means the read timed out without data.
pub fn read_byte<P: Read + ?Sized>(port: &mut P) -> Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match port.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        }
    }
}

fn write_byte_read<P: Read + Write + ?Sized>(
    port: &mut P,
    byte: u8,
    pause: Duration,
) -> Result<Option<u8>> {
    sleep(pause);
    port.write_all(&[byte])?;
    sleep(pause);
    read_byte(port)
}

/// Sends `byte` and waits for the display to echo it back.
///
/// The reply has to equal `expected_echo`, or `byte` itself when no
/// override is given. Returns the reply.
pub fn write_byte_check_echo<P: Read + Write + ?Sized>(
    port: &mut P,
    byte: u8,
    expected_echo: Option<u8>,
    pause: Duration,
) -> Result<u8> {
    let expected = expected_echo.unwrap_or(byte);
    let reply = match write_byte_read(port, byte, pause)? {
        Some(reply) => reply,
        None => return Err(Error::NoResponse { sent: byte }),
    };
    trace!("Wrote {}, echo {}", debug::describe_byte(byte), debug::describe_byte(reply));
    if reply != expected {
        return Err(Error::EchoMismatch {
            expected,
            actual: reply,
        });
    }
    Ok(reply)
}

/// Accumulates bytes up to and including `terminator`.
pub fn read_until<P: Read + ?Sized>(port: &mut P, terminator: u8) -> Result<Vec<u8>> {
    let mut received: Vec<u8> = Vec::new();
    loop {
        let byte = match read_byte(port)? {
            Some(byte) => byte,
            None => {
                return Err(Error::Timeout {
                    terminator,
                    received: received.len(),
                })
            }
        };
        received.push(byte);
        if byte == terminator {
            break;
        }
    }
    trace!("Read {}", debug::hex_dump(&received));
    Ok(received)
}
