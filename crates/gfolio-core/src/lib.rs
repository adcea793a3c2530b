//! # gfolio Core
//!
//! Client library for a finance provider's portfolio feeds and public
//! market data pages.
//!
//! ## Overview
//!
//! - **Session** with ClientLogin-style authentication and request headers
//! - **Portfolio store** kept in memory and merged from the JSON feeds
//! - **Normalizers** turning JSON, CSV and HTML responses into plain records
//! - **Market data** client for historical quotes, ticks and financials
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Endpoints and client identity |
//! | [`domain`] | Portfolio, Position, Quote, Tick, Symbol |
//! | [`error`] | Error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`market`] | Unauthenticated market data pages |
//! | [`normalize`] | Response normalizers |
//! | [`portfolios`] | Portfolio and position feed operations |
//! | [`session`] | Credentials, token and headers |
//! | [`store`] | In-memory portfolio store |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gfolio_core::{Credentials, GfolioConfig, ReqwestHttpClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GfolioConfig::from_env();
//!     let credentials = Credentials::from_config("me@example.com", "secret", &config);
//!     let mut session = Session::new(credentials, config, Arc::new(ReqwestHttpClient::new()));
//!
//!     session.login().await?;
//!     for title in session.list_portfolios().await? {
//!         println!("{title}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  headers   ┌──────────────┐
//! │   Session    │──────────▶│ HTTP Client  │
//! └──────┬───────┘            └──────┬───────┘
//!        │                           │ status + body
//!        ▼                           ▼
//! ┌──────────────┐  records   ┌──────────────┐
//! │PortfolioStore│◀──────────│ Normalizers  │
//! └──────────────┘            └──────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use gfolio_core::FinanceError;
//!
//! fn describe(error: &FinanceError) -> &'static str {
//!     match error {
//!         FinanceError::NotAuthenticated => "log in first",
//!         FinanceError::SymbolNotFound { .. } => "check the ticker",
//!         _ => error.code(),
//!     }
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod market;
pub mod normalize;
pub mod portfolios;
pub mod session;
pub mod store;

pub use config::GfolioConfig;

pub use domain::{
    validate_currency_code, FinancialsResult, Portfolio, PortfolioData, Position, PositionSymbol,
    Quote, Snapshot, StatementPeriod, Symbol, Tick, Transaction,
};

pub use error::{FinanceError, ValidationError};

pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient, ScriptedHttpClient,
};

pub use market::MarketData;

pub use portfolios::{portfolio_entry_xml, DeleteOutcome};

pub use session::{AuthToken, Credentials, Session};

pub use store::PortfolioStore;
