//! runpad - Elm-style multi-language code editing session engine
//!
//! This crate provides the state, messages and async runtime for an editor
//! that runs code on a remote execution service and asks a generation
//! service to write or refactor it. Front ends implement `runtime::Host`.

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod download;
pub mod languages;
pub mod messages;
pub mod model;
pub mod responsive;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use auth::{AuthContext, AuthGate};
pub use commands::Cmd;
pub use config::AppConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::{Host, Runtime};
pub use services::{HttpServices, RemoteServices};
