//! Foundation types for Mini Blog.
//!
//! This crate provides the record shapes persisted by `miniblog-store` and
//! consumed by every front end. Nothing here touches storage.
//!
//! # Key Types
//!
//! - [`Blog`] -- A post, embedding its comments
//! - [`Comment`] -- Feedback attached to exactly one blog
//! - [`BlogId`] / [`CommentId`] -- Integer identifiers assigned as `max + 1`
//! - [`NewBlog`] / [`NewComment`] -- Caller-supplied fields for creation
//! - [`BlogPatch`] -- Shallow-merge update that cannot carry `id` or `createdAt`
//! - [`Clock`] -- Time source used to stamp new records

pub mod blog;
pub mod comment;
pub mod error;
pub mod id;
pub mod read_time;
pub mod temporal;

pub use blog::{Blog, BlogPatch, NewBlog};
pub use comment::{Comment, NewComment};
pub use error::TypeError;
pub use id::{BlogId, CommentId};
pub use read_time::{read_time_label, read_time_minutes, CHARS_PER_MINUTE};
pub use temporal::{Clock, FixedClock, SystemClock};
