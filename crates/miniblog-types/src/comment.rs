use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::CommentId;

/// Feedback attached to exactly one blog.
///
/// Comments are embedded in their parent [`Blog`](crate::Blog) and have no
/// existence outside it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique within the parent blog only.
    pub id: CommentId,
    pub author: String,
    pub content: String,
    /// Full UTC timestamp assigned when the comment was added.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment from caller fields plus store-assigned id and time.
    pub fn from_new(id: CommentId, created_at: DateTime<Utc>, new: NewComment) -> Self {
        Self {
            id,
            author: new.author,
            content: new.content,
            created_at,
        }
    }
}

/// Caller-supplied fields for a new comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub author: String,
    pub content: String,
}

impl NewComment {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}
