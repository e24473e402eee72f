//! SafeQ engine: session/export protocol client, file persistence and the run loop.
mod client;
mod http;
mod persist;
mod runner;
mod types;

pub use client::ExportClient;
pub use http::{ClientSettings, DEFAULT_TIMEOUT};
pub use persist::{save_export, SaveError};
pub use runner::{Runner, UserExporter};
pub use types::{FailureKind, RequestError};
