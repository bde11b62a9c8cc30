//! Reading-time estimate shown next to each post.

/// Characters of content counted as one minute of reading.
pub const CHARS_PER_MINUTE: usize = 1000;

/// Estimated minutes to read `content`, rounded up.
pub fn read_time_minutes(content: &str) -> usize {
    content.chars().count().div_ceil(CHARS_PER_MINUTE)
}

/// The `readTime` label stored on a blog, e.g. `"3 min read"`.
pub fn read_time_label(content: &str) -> String {
    format!("{} min read", read_time_minutes(content))
}
