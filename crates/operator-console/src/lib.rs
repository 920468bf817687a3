//! Operator Console
//!
//! Interactive client that builds sensor windows, submits them to the RUL
//! gateway (in-process or over HTTP), and renders the classified result.

mod backend;
mod client;
mod commands;
pub mod render;
mod session;

pub use backend::Backend;
pub use client::GatewayClient;
pub use commands::Command;
pub use session::{Session, MAX_ENGINE_ID};

use inference_engine::{InferenceError, ValidationError};
use thiserror::Error;

/// Errors surfaced to the console operator
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Predict was requested before any window was generated
    #[error("No sensor data loaded. Run `generate` to create a sample window first.")]
    NoData,

    #[error("Engine ID must be between 1 and {max}, got {value}")]
    InvalidEngineId { value: u64, max: u32 },

    /// Gateway answered with a non-success status
    #[error("Gateway returned {status}: {detail}")]
    Gateway { status: u16, detail: String },

    #[error("Gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}
