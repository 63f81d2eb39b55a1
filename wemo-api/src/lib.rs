//! High-level Wemo API for smart-plug control
//!
//! This crate turns user command tokens into `basicevent` SOAP actions,
//! sends them to a device through an injected [`soap_client::SoapTransport`],
//! and interprets the replies into human-readable results.
//!
//! ```rust,no_run
//! use soap_client::SoapClient;
//! use wemo_api::{command, Dispatcher, TargetAddress};
//!
//! let requests = command::resolve_all(["on", "state"])?;
//! let target = TargetAddress::parse("192.168.1.40", "49153")?;
//!
//! let dispatcher = Dispatcher::new(SoapClient::new());
//! dispatcher.run(&target, &requests, &mut std::io::stdout())?;
//! # Ok::<(), wemo_api::ApiError>(())
//! ```

pub mod address;
pub mod command;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod response;
pub mod service;

pub use address::{TargetAddress, DEFAULT_PORT};
pub use command::{resolve, resolve_all};
pub use dispatch::{DispatchReport, Dispatcher, DEFAULT_PACING};
pub use envelope::{build_envelope, SoapEnvelope};
pub use error::{ApiError, Result};
pub use operation::{CommandRequest, Operation};
pub use response::{interpret_response, interpret_response_with, TagMatching};
pub use service::{Service, ServiceInfo};
