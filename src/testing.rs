//! In-memory stand-in for the display, used by the unit tests.

use std::collections::VecDeque;
use std::io;
use std::io::{Read, Write};

use crate::control_code::{
    CR, ESC, ETX, NUL, RECEIVE_IDENTIFICATION, RECEIVE_STANDARD_TEXT, RECEIVE_TEXT, STX,
};

pub const IDENTIFICATION_FIELDS: [&str; 12] = [
    "V2.31", "Mobitec", "x", "y", "z", "w", "123456", "HELLO", "WORLD", "7x5", "Bold", "1A",
];

pub fn identification_frame(fields: &[&str]) -> Vec<u8> {
    let mut frame = Vec::new();
    for field in fields {
        frame.extend_from_slice(field.as_bytes());
        frame.push(NUL);
    }
    frame.push(ETX);
    frame
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    /// Echoes every byte, never answers a command.
    Echo,
    /// Replies with the given byte whatever was sent.
    WrongEcho(u8),
    /// Never replies.
    Silent,
    /// Echoes and answers commands, storing the last text it was sent.
    Display,
}

pub struct FakeDevice {
    behavior: Behavior,
    to_host: VecDeque<u8>,
    written: Vec<u8>,
    frame: Vec<u8>,
    text: Vec<u8>,
    standard_text: Vec<u8>,
    identification: Vec<u8>,
    corrupt_echo_at: Option<usize>,
    capacity: Option<usize>,
}

impl FakeDevice {
    pub fn new(behavior: Behavior) -> FakeDevice {
        FakeDevice {
            behavior,
            to_host: VecDeque::new(),
            written: Vec::new(),
            frame: Vec::new(),
            text: Vec::new(),
            standard_text: b"GUTE FAHRT".to_vec(),
            identification: identification_frame(&IDENTIFICATION_FIELDS),
            corrupt_echo_at: None,
            capacity: None,
        }
    }

    pub fn display() -> FakeDevice {
        FakeDevice::new(Behavior::Display)
    }

    pub fn with_text(mut self, text: &[u8]) -> FakeDevice {
        self.text = text.to_vec();
        self
    }

    pub fn with_identification(mut self, frame: Vec<u8>) -> FakeDevice {
        self.identification = frame;
        self
    }

    /// Keeps only the first `capacity` bytes of a text it is sent.
    pub fn with_capacity(mut self, capacity: usize) -> FakeDevice {
        self.capacity = Some(capacity);
        self
    }

    /// Answers the `index`-th byte written (counting from zero) with a NAK.
    pub fn corrupt_echo_at(mut self, index: usize) -> FakeDevice {
        self.corrupt_echo_at = Some(index);
        self
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    fn answer(&mut self, body: &[u8]) {
        self.to_host.extend(body);
        self.to_host.extend([CR, ETX]);
    }

    fn handle_frame(&mut self) {
        let frame = std::mem::take(&mut self.frame);
        match frame.as_slice() {
            [ESC, RECEIVE_IDENTIFICATION, ETX] => {
                let identification = self.identification.clone();
                self.to_host.extend(identification);
            }
            [ESC, RECEIVE_STANDARD_TEXT, ETX] => {
                let text = self.standard_text.clone();
                self.answer(&text);
            }
            [ESC, RECEIVE_TEXT, ETX] => {
                let text = self.text.clone();
                self.answer(&text);
            }
            [STX, CR, text @ .., ETX] => {
                let n = self.capacity.unwrap_or(text.len()).min(text.len());
                self.text = text[..n].to_vec();
            }
            _ => (),
        }
    }

    fn receive(&mut self, byte: u8) {
        let index = self.written.len();
        self.written.push(byte);

        let echo = match self.behavior {
            Behavior::Silent => return,
            Behavior::WrongEcho(reply) => reply,
            Behavior::Echo | Behavior::Display => byte,
        };
        if self.corrupt_echo_at == Some(index) {
            self.to_host.push_back(0x15);
        } else {
            self.to_host.push_back(echo);
        }

        if self.behavior != Behavior::Display {
            return;
        }
        self.frame.push(byte);
        if byte == ETX {
            self.handle_frame();
        }
    }
}

impl Read for FakeDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.to_host.pop_front() {
            Some(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            // nothing queued behaves like a read timeout
            None => Ok(0),
        }
    }
}

impl Write for FakeDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            self.receive(byte);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
