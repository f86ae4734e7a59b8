use evreg_derive::api_model;

/// `{"index": n}` body of the delete-by-position endpoints.
#[api_model(deny_unknown_fields = false)]
pub struct IndexRequest {
    /// Zero-based position; a missing value is an invalid index
    #[serde(default)]
    pub index: Option<i64>,
}

impl IndexRequest {
    /// The requested position, with a missing index mapped to `-1` (always out of range).
    #[must_use]
    pub fn position(&self) -> i64 {
        self.index.unwrap_or(-1)
    }
}
