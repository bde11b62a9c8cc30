use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::comment::{Comment, NewComment};
use crate::error::TypeError;
use crate::id::{BlogId, CommentId};
use crate::read_time::read_time_label;

/// A blog post.
///
/// Serialized with camelCase field names (`coverImage`, `readTime`,
/// `createdAt`). `createdAt` is a bare `YYYY-MM-DD` date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    /// Unique across the collection, never changed after creation.
    pub id: BlogId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub cover_image: String,
    pub read_time: String,
    /// Assigned at creation, never changed by updates.
    pub created_at: NaiveDate,
    /// Insertion order. Records persisted without comments load as empty.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Blog {
    /// Build a blog from caller fields plus store-assigned id and date.
    pub fn from_new(id: BlogId, created_at: NaiveDate, new: NewBlog) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            author: new.author,
            category: new.category,
            cover_image: new.cover_image,
            read_time: new.read_time,
            created_at,
            comments: Vec::new(),
        }
    }

    /// Id for the next comment on this blog: `max + 1`, or `1`.
    pub fn next_comment_id(&self) -> Result<CommentId, TypeError> {
        CommentId::next_after(self.comments.iter().map(|c| c.id))
    }

    /// Look up a comment by id.
    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Append a comment stamped with `created_at` and return its id.
    ///
    /// The blog is left unchanged if no comment id is left.
    pub fn push_comment(
        &mut self,
        created_at: chrono::DateTime<chrono::Utc>,
        new: NewComment,
    ) -> Result<CommentId, TypeError> {
        let id = self.next_comment_id()?;
        self.comments.push(Comment::from_new(id, created_at, new));
        Ok(id)
    }

    /// Remove a comment by id. Returns `true` if one was removed.
    pub fn remove_comment(&mut self, id: CommentId) -> bool {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != id);
        self.comments.len() != before
    }
}

/// Caller-supplied fields for a new blog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub cover_image: String,
    pub read_time: String,
}

impl NewBlog {
    /// Fields for a new post, with `readTime` derived from `content`.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        cover_image: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let read_time = read_time_label(&content);
        Self {
            title: title.into(),
            content,
            author: author.into(),
            category: category.into(),
            cover_image: cover_image.into(),
            read_time,
        }
    }

    /// Replace the derived read-time label.
    pub fn with_read_time(mut self, read_time: impl Into<String>) -> Self {
        self.read_time = read_time.into();
        self
    }
}

/// A shallow-merge update for a blog.
///
/// Present fields overwrite, absent fields are kept. There is no way to
/// express a change to `id`, `createdAt` or `comments`; unknown keys in a
/// serialized patch are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
}

impl BlogPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }

    pub fn read_time(mut self, read_time: impl Into<String>) -> Self {
        self.read_time = Some(read_time.into());
        self
    }

    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.author.is_none()
            && self.category.is_none()
            && self.cover_image.is_none()
            && self.read_time.is_none()
    }

    /// Merge this patch onto `blog`.
    pub fn apply_to(self, blog: &mut Blog) {
        if let Some(title) = self.title {
            blog.title = title;
        }
        if let Some(content) = self.content {
            blog.content = content;
        }
        if let Some(author) = self.author {
            blog.author = author;
        }
        if let Some(category) = self.category {
            blog.category = category;
        }
        if let Some(cover_image) = self.cover_image {
            blog.cover_image = cover_image;
        }
        if let Some(read_time) = self.read_time {
            blog.read_time = read_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Blog {
        Blog::from_new(
            BlogId::new(1),
            date(2023, 10, 15),
            NewBlog::new("A", "c", "x", "tech", "u").with_read_time("1 min"),
        )
    }

    #[test]
    fn new_blog_derives_read_time() {
        let new = NewBlog::new("t", "a".repeat(2500), "x", "tech", "u");
        assert_eq!(new.read_time, "3 min read");
    }

    #[test]
    fn from_new_starts_without_comments() {
        let blog = sample();
        assert_eq!(blog.id, BlogId::new(1));
        assert_eq!(blog.read_time, "1 min");
        assert!(blog.comments.is_empty());
    }

    #[test]
    fn serializes_camel_case_and_date_only() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["coverImage"], "u");
        assert_eq!(value["readTime"], "1 min");
        assert_eq!(value["createdAt"], "2023-10-15");
        assert!(value["comments"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_comments_load_as_empty() {
        let json = r#"{
            "id": 3, "title": "t", "content": "c", "author": "a",
            "category": "travel", "coverImage": "u",
            "createdAt": "2023-10-05", "readTime": "12 min read"
        }"#;
        let blog: Blog = serde_json::from_str(json).unwrap();
        assert_eq!(blog.id, BlogId::new(3));
        assert!(blog.comments.is_empty());
    }

    #[test]
    fn comment_ids_are_max_plus_one() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut blog = sample();
        assert_eq!(blog.push_comment(at, NewComment::new("a", "1")).unwrap(), CommentId::new(1));
        assert_eq!(blog.push_comment(at, NewComment::new("b", "2")).unwrap(), CommentId::new(2));
        assert!(blog.remove_comment(CommentId::new(1)));
        assert_eq!(blog.next_comment_id().unwrap(), CommentId::new(3));
        assert!(blog.comment(CommentId::new(2)).is_some());
        assert!(blog.comment(CommentId::new(1)).is_none());
    }

    #[test]
    fn push_comment_after_max_id_fails_without_change() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut blog = sample();
        blog.comments
            .push(Comment::from_new(CommentId::new(u64::MAX), at, NewComment::new("a", "1")));
        let err = blog.push_comment(at, NewComment::new("b", "2")).unwrap_err();
        assert!(matches!(err, TypeError::IdsExhausted { kind: "comment", .. }));
        assert_eq!(blog.comments.len(), 1);
    }

    #[test]
    fn remove_missing_comment_is_noop() {
        let mut blog = sample();
        assert!(!blog.remove_comment(CommentId::new(9)));
        assert!(blog.comments.is_empty());
    }

    #[test]
    fn patch_overwrites_present_fields_only() {
        let mut blog = sample();
        BlogPatch::new().title("B").category("design").apply_to(&mut blog);
        assert_eq!(blog.title, "B");
        assert_eq!(blog.category, "design");
        assert_eq!(blog.content, "c");
        assert_eq!(blog.author, "x");
    }

    #[test]
    fn empty_patch() {
        assert!(BlogPatch::new().is_empty());
        assert!(!BlogPatch::new().read_time("2 min").is_empty());
    }

    #[test]
    fn patch_ignores_identity_keys() {
        let json = r#"{"id": 99, "createdAt": "1999-01-01", "title": "new"}"#;
        let patch: BlogPatch = serde_json::from_str(json).unwrap();
        assert_eq!(patch, BlogPatch::new().title("new"));
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let value = serde_json::to_value(BlogPatch::new().cover_image("img")).unwrap();
        assert_eq!(value, serde_json::json!({ "coverImage": "img" }));
    }

    proptest! {
        #[test]
        fn patch_never_touches_identity(
            title in proptest::option::of("[a-z]{0,12}"),
            content in proptest::option::of("[a-z ]{0,40}"),
            category in proptest::option::of("[a-z]{0,8}"),
        ) {
            let mut blog = sample();
            let before = blog.clone();
            let patch = BlogPatch { title, content, category, ..BlogPatch::default() };
            patch.apply_to(&mut blog);
            prop_assert_eq!(blog.id, before.id);
            prop_assert_eq!(blog.created_at, before.created_at);
            prop_assert_eq!(blog.comments, before.comments);
        }
    }
}
