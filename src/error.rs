use thiserror::Error;

/// Errors raised while talking to the display.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No response from MagicBall after sending {sent:#04x}")]
    NoResponse { sent: u8 },

    #[error("Unexpected reply from MagicBall: expected {expected:#04x}, got {actual:#04x}")]
    EchoMismatch { expected: u8, actual: u8 },

    #[error("Timed out waiting for {terminator:#04x} after {received} bytes")]
    Timeout { terminator: u8, received: usize },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Character {0:?} is not representable in code page 437")]
    Unrepresentable(char),

    #[error("Failed to open \"{path}\": {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
