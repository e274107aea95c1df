//! Custom request extractors.

mod page_request;
mod url_params;
mod validated_json;

pub use page_request::PageRequest;
pub use url_params::{Path, Query};
pub use validated_json::ValidatedJson;
