//
//  campus-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Campus Client Library
//!
//! Typed HTTP client for the Campus learning platform backend: practice
//! challenges, the community forum, projects and user dashboards.
//!
//! ## Overview
//!
//! Every call made through this crate resolves to an [`ApiResult`], a
//! success/failure wrapper that never needs a `match` on HTTP status codes.
//! Underneath, requests flow through an ordered interceptor chain, an
//! optional retry policy, and a TTL response cache.
//!
//! ## Module Structure
//!
//! - [`api`]: transport, normalization, cache, retry, interceptors and service facades
//! - [`config`]: TOML configuration and environment overrides
//! - [`output`]: table and JSON rendering for the `campus` binary
//! - [`cli`]: command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use campus_client::api::ApiClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ApiClient::new("http://localhost:8080/api/v1")?;
//! let challenge = client.challenges().get("x1").await;
//!
//! if let Some(challenge) = challenge.data() {
//!     println!("{} ({} points)", challenge.title, challenge.points);
//! }
//! # Ok(())
//! # }
//! ```

/// API client layer.
///
/// Contains the transport, response normalizer, response cache, retry
/// policy, interceptor chain and the typed per-domain service facades.
pub mod api;

/// Command-line interface definitions.
pub mod cli;

/// Configuration file management.
///
/// Stored in platform-specific locations:
/// - Linux: `~/.config/campus/config.toml`
/// - macOS: `~/Library/Application Support/campus/config.toml`
/// - Windows: `%APPDATA%\campus\config.toml`
pub mod config;

/// Output formatting (tables and JSON).
pub mod output;

pub use api::{ApiClient, ApiError, ApiResult};
pub use cli::Cli;
pub use config::Config;

/// Application name constant.
pub const APP_NAME: &str = "campus";

/// Application version constant, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use campus_client::VERSION;
///
/// println!("campus version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// The backend rejected the credentials (HTTP 401 or 403).
    ///
    /// Run `campus auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist (HTTP 404).
    pub const NOT_FOUND: i32 = 8;
}
