//! File attachments on events.

use serde::{Deserialize, Serialize};

/// A file attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub title: String,
    pub file_url: String,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(
        file_url: impl Into<String>,
        title: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Attachment {
            title: title.into(),
            file_url: file_url.into(),
            mime_type: mime_type.into(),
        }
    }
}
