//! HTTP client, board controller and CLI
//!
//! This crate provides the `activityboard` command-line interface.

pub mod api;
pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod feedback;

pub use api::ApiClient;
pub use board::{
    ActivityBoard, BoardEvent, ClickTarget, DispatchOutcome, FetchOutcome, MutationOutcome,
};
pub use cli::Cli;
pub use confirm::{AlwaysConfirm, Confirm, NeverConfirm, RecordingConfirm, TerminalConfirm};
pub use error::{ClientError, ClientResult};
pub use feedback::MessageArea;
