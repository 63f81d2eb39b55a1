use soap_client::SoapError;
use thiserror::Error;

/// High-level API errors for Wemo operations
///
/// Input errors (`UnrecognizedCommand`, `InvalidCommand`, `InvalidAddress`,
/// `InvalidPort`) are raised before any network activity. Everything else
/// comes out of a device exchange.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A command token matched none of the known commands
    #[error("Unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    /// A rename command without a usable `change=NAME` argument
    #[error("Missing name for command 'change=NAME'. Received '{0}'")]
    InvalidCommand(String),

    /// The target address is not a dotted-quad IPv4 address
    #[error("IP address '{0}' is invalid")]
    InvalidAddress(String),

    /// The target port is not a TCP port number in 1..=65535
    #[error("Port '{0}' is invalid")]
    InvalidPort(String),

    /// Network communication error
    ///
    /// Connection refused, timeouts, unreachable device.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// SOAP fault returned by device
    #[error("SOAP fault: error code {0}")]
    SoapFault(u16),

    /// Device answered with a non-success HTTP status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// A queued command failed and the rest of the batch was abandoned
    #[error("Command {command} failed after {completed} of {total} command(s) completed")]
    CommandFailed {
        command: String,
        completed: usize,
        total: usize,
        #[source]
        source: Box<ApiError>,
    },

    /// Writing a result line failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Whether this error was detected while validating user input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ApiError::UnrecognizedCommand(_)
                | ApiError::InvalidCommand(_)
                | ApiError::InvalidAddress(_)
                | ApiError::InvalidPort(_)
        )
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Convert from SoapError to ApiError
impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => ApiError::NetworkError(msg),
            SoapError::Fault(code) => ApiError::SoapFault(code),
            SoapError::Status(code) => ApiError::HttpStatus(code),
        }
    }
}
