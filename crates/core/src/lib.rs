//! TL;DW Core Library
//!
//! Client side of the tldw summarization service: API types and client,
//! location/history handling, and the page controller shared by the CLI and
//! desktop front ends.

pub mod client;
pub mod config;
pub mod controller;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod location;
pub mod session;
pub mod types;
pub mod youtube;

// Re-export commonly used items at crate root
pub use client::{SummarizerApi, TldwClient};
pub use config::Settings;
pub use controller::{Completion, Controller, Effect, FollowupExchange, Outcome};
pub use endpoint::Endpoint;
pub use error::{Result, TldwError};
pub use format::{aspect_padding_percent, format_summary_readable};
pub use location::{History, Location};
pub use session::{Session, perform};
pub use types::{ChatResponse, LoadedVideo, Reply, Summary, SummarizeResponse, VideoInfo};
pub use youtube::{embed_url, watch_url};
