//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// `Planning Center` API constants.
pub mod api {
    /// Base URL of the `Planning Center` Online API.
    pub const DEFAULT_BASE_URL: &str = "https://api.planningcenteronline.com";

    /// Path of the services events collection.
    pub const EVENTS_PATH: &str = "/services/v2/events";

    /// Path of the sermon series collection.
    pub const SERMONS_PATH: &str = "/sermons/v2/series";

    /// Path of the groups collection.
    pub const GROUPS_PATH: &str = "/groups/v2/groups";

    /// Query parameter carrying the page size.
    pub const PAGE_SIZE_PARAM: &str = "per_page";

    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
}

/// Listing request defaults.
pub mod listing {
    /// Content type keyword used when none is given.
    pub const DEFAULT_TYPE: &str = "events";

    /// Number of items requested when no limit is given.
    pub const DEFAULT_LIMIT: u32 = 5;
}

/// Rendered-fragment cache constants.
pub mod cache {
    /// Prefix of every cache key.
    pub const KEY_PREFIX: &str = "pco_cache_";

    /// Default lifetime of a cached fragment (one hour).
    pub const DEFAULT_TTL_SECS: u64 = 60 * 60;

    /// Directory name under the platform cache dir used by the file store.
    pub const DIR_NAME: &str = "pco-embed";
}

/// HTML output constants.
pub mod html {
    /// CSS class shared by every rendered list.
    pub const LIST_CLASS: &str = "pco-list";

    /// CSS class of the date span inside event items.
    pub const DATE_CLASS: &str = "pco-date";

    /// Default `strftime` pattern for event dates.
    pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

    /// Title used for items without a name.
    pub const UNTITLED: &str = "Untitled";

    /// Fragment shown for an unknown content type.
    pub const UNSUPPORTED_TYPE: &str =
        "<p>Unsupported Planning Center type. Use events, sermons, or groups.</p>";

    /// Fragment shown when the upstream fetch fails.
    pub const LOAD_FAILED: &str = "<p>Unable to load Planning Center data.</p>";

    /// Fragment shown for an empty listing.
    pub const NO_ITEMS: &str = "<p>No Planning Center items found.</p>";

    /// URL schemes allowed in item links.
    pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "webcal"];
}
