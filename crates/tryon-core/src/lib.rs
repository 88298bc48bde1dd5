//! Shared vocabulary types for the try-on product detection pipeline.
//!
//! `tryon-core` owns the wire-level [`DetectedProduct`] record, the
//! [`GarmentType`] enumeration, the per-storefront [`SiteProfile`] catalog,
//! and environment-driven application configuration. The detection logic
//! itself lives in `tryon-detector`; host-side scheduling and state live in
//! `tryon-host`.

mod app_config;
mod config;
mod error;
mod product;
mod sites;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use product::{DetectedProduct, GarmentType};
pub use sites::{builtin_profiles, SelectorSet, SiteCatalog, SiteProfile};
