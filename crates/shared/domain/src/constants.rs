//! Shared string constants.

// OpenAPI tags
pub const SYSTEM_TAG: &str = "System";
pub const REGISTRATION_TAG: &str = "Registration";
pub const CATALOG_TAG: &str = "Catalog";
pub const REPORTS_TAG: &str = "Reports";
pub const IDENTITY_TAG: &str = "Identity";
pub const CONTACT_TAG: &str = "Contact";

// Response envelope
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAIL: &str = "fail";

/// Event whose report is grouped by gender.
pub const SPORTS_EVENT: &str = "sports";

/// Number of ASCII digits in a valid student id.
pub const STUDENT_ID_LEN: usize = 12;
