//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading, the API state that carries feature
//! slices into handlers, and the system routes every server mounts.
//!
//! ## Config loading
//! ```rust,no_run
//! use ncss_kernel::config::load_config;
//! use ncss_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! println!("listening on {}:{}", cfg.server.address, cfg.server.port);
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use ncss_domain as domain;
