//! Application configuration.
//!
//! Centralized configuration for the Gem ERP frontend.
//! Values are baked in at compile time; `trunk build` picks up the
//! `GEM_ERP_*` environment variables listed below.

/// Backend API base URL.
///
/// Override with `GEM_ERP_API_URL`.
pub const API_URL: &str = match option_env!("GEM_ERP_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080/api/v1",
};

/// Where form schemas come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaSource {
    /// Static schemas bundled in the app, served after a fake delay
    Mock,
    /// `GET {API_URL}/inventory/schemas/{type}`
    Remote,
}

/// Schema source, `Remote` when `GEM_ERP_REMOTE_SCHEMAS` is set at build time.
pub const SCHEMA_SOURCE: SchemaSource = match option_env!("GEM_ERP_REMOTE_SCHEMAS") {
    Some(_) => SchemaSource::Remote,
    None => SchemaSource::Mock,
};

/// Simulated network latency of the mock schema provider (ms).
pub const SCHEMA_LATENCY_MS: u32 = 500;

/// Percentage added on every simulated upload tick.
pub const UPLOAD_PROGRESS_STEP: u8 = 10;

/// Interval between simulated upload ticks (ms).
pub const UPLOAD_TICK_MS: u32 = 200;

/// Maximum photo size accepted by the media picker (in bytes).
///
/// 20 MB limit.
pub const MAX_PHOTO_SIZE: f64 = 20.0 * 1024.0 * 1024.0;

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// DOM id of the element the camera widget renders into.
pub const SCANNER_ELEMENT_ID: &str = "qr-reader";
