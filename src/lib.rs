//! # Agenda
//!
//! Dashboard client for the agenda REST backend: technical areas, the
//! legislative events tagged with them, CNM stance statistics and the
//! proposals tracked per area.
//!
//! ## Modules
//!
//! - [`client`]: Data sync over the REST API (typed operations, transport seam)
//! - [`state`]: View state, panel navigation, filters and request generations
//! - [`render`]: View-models plus HTML and terminal rendering
//! - [`dashboard`]: Controller binding the three together
//! - [`poller`]: Background check for new events
//! - [`form`]: Add-proposal form input and validation
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agenda::{ApiClient, ClientConfig, Dashboard, LogPresenter};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::http(ClientConfig::default())?;
//!     let dashboard = Dashboard::new(client, Arc::new(LogPresenter));
//!
//!     dashboard.initialize().await?;
//!     dashboard.select_area("Saúde").await?;
//!
//!     let page = dashboard.page().await;
//!     println!("{}", agenda::render::text::page(&page));
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod models;
pub mod poller;
pub mod render;
pub mod state;

// Re-export top-level types for convenience
pub use client::{
    ApiClient, ApiRequest, ApiResponse, ClientConfig, ClientError, ClientResult, Endpoint,
    HttpTransport, Method, Transport, DEFAULT_API_BASE,
};

pub use models::{
    Area, Body, DateRange, Event, Health, Proposal, ProposalFields, Stance, Statistics,
};

pub use state::{AreaCounts, AreaData, EventFilter, Panel, ViewState};

pub use dashboard::{Dashboard, LogPresenter, Presenter};

pub use error::{DashboardError, DashboardResult, ValidationError};

pub use form::{NoteField, ProposalForm, NOTE_MAX_CHARS};

pub use poller::{PollSubscription, DEFAULT_POLL_INTERVAL};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, PollingConfig};
