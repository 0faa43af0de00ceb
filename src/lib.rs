pub mod api;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod query;
pub mod services;
pub mod settings;

/// Window size requested by listing and search pages.
pub const DEFAULT_PAGE_LIMIT: usize = 6;
/// Window size of the probe request used to count search matches. Totals
/// derived from the probe saturate at this many items.
pub const COUNT_PROBE_LIMIT: usize = 100;
