//! Core types: activities, board view, formatting, tracing

pub mod activity;
pub mod format;
pub mod message;
pub mod tracing;
pub mod view;

pub use activity::{Activity, ActivityCatalog, ActivityDetails};
pub use format::{
    BoardFormatter, FormatOptions, JsonBoard, OutputFormat, bulletize, ellipsis, html_escape,
};
pub use message::{Message, MessageView, Severity};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use view::{
    ActivityCard, BoardView, ListView, ParticipantRow, RemoveControl, SelectOption, SignupForm,
    activity_options,
};
