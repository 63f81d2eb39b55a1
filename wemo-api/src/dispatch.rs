use std::io::Write;
use std::thread;
use std::time::Duration;

use soap_client::SoapTransport;
use tracing::{debug, info};

use crate::address::TargetAddress;
use crate::envelope::build_envelope;
use crate::error::{ApiError, Result};
use crate::operation::{CommandRequest, Operation};
use crate::response::{interpret_response_with, TagMatching};

/// Pause between consecutive device calls
///
/// Wemo firmware handles one request at a time and drops requests that
/// arrive while it is still busy.
pub const DEFAULT_PACING: Duration = Duration::from_millis(1000);

/// Summary of a batch that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Control URL every command was sent to
    pub endpoint: String,
    /// Number of commands executed
    pub completed: usize,
}

/// Executes resolved commands against a device, one at a time
///
/// The dispatcher bridges the stateless translation functions and a
/// [`SoapTransport`]. Commands run strictly in order; the first failure
/// abandons the rest of the batch.
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    transport: T,
    pacing: Duration,
    matching: TagMatching,
}

impl<T: SoapTransport> Dispatcher<T> {
    /// Create a dispatcher with the default pacing and tag matching
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            pacing: DEFAULT_PACING,
            matching: TagMatching::default(),
        }
    }

    /// Set the pause inserted between consecutive commands
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set how the result element is located in replies
    pub fn with_tag_matching(mut self, matching: TagMatching) -> Self {
        self.matching = matching;
        self
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Execute one command against `url` and return its result text
    pub fn execute(&self, url: &str, request: &CommandRequest) -> Result<String> {
        let envelope = build_envelope(request);

        let response = self
            .transport
            .post(url, &envelope.soap_action, &envelope.body)?;
        debug!(status = response.status, body = %response.body, "device response");

        let body = response.into_body()?;
        Ok(interpret_response_with(&request.operation, &body, self.matching))
    }

    /// Execute every request in order, writing one result line per command to `out`
    ///
    /// On failure the lines of earlier commands have already been written and
    /// the error reports how many commands completed.
    pub fn run<W: Write>(
        &self,
        target: &TargetAddress,
        requests: &[CommandRequest],
        out: &mut W,
    ) -> Result<DispatchReport> {
        let endpoint = target.control_url(Operation::SERVICE);
        let total = requests.len();

        for (index, request) in requests.iter().enumerate() {
            if index > 0 && !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }

            info!(
                command = %request.operation,
                token = %request.token,
                position = index + 1,
                total,
                "sending command"
            );

            let result = self
                .execute(&endpoint, request)
                .map_err(|source| ApiError::CommandFailed {
                    command: request.operation.name().to_string(),
                    completed: index,
                    total,
                    source: Box::new(source),
                })?;

            writeln!(out, "{}", result_line(&endpoint, &request.operation, &result))?;
            out.flush()?;
        }

        Ok(DispatchReport {
            endpoint,
            completed: total,
        })
    }
}

/// Format the line printed for one executed command
pub fn result_line(endpoint: &str, operation: &Operation, result: &str) -> String {
    format!("URL: {}, Command: {}, Result: {}", endpoint, operation, result)
}
