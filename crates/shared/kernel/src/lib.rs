//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, plus (with `server`) the API state,
//! the error-to-response mapping, request extractors and the system routes.
//!
//! ## Config loading
//! ```rust,ignore
//! use hhub_kernel::config::load_config;
//! use hhub_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```

pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use hhub_domain as domain;
