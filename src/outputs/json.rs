//! JSON rendering for API consumers.
//!
//! A document renders as an array with one object per record, `pub_date` as
//! an ISO-8601 string. The empty-configuration document renders as an array
//! holding a single `{"error": ...}` object.

use crate::models::{FeedDocument, FeedEntries};
use serde_json::json;
use tracing::instrument;

/// Serialize `doc` into the JSON array served by the API path.
#[instrument(level = "debug", skip_all)]
pub fn render_json(doc: &FeedDocument) -> Result<Vec<u8>, serde_json::Error> {
    match &doc.entries {
        FeedEntries::Records(records) => serde_json::to_vec(records),
        FeedEntries::NoSitesConfigured(notice) => serde_json::to_vec(&[json!({ "error": notice })]),
    }
}
