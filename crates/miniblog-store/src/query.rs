//! Read-side filtering over a loaded collection.
//!
//! All matching is case-insensitive. Nothing here touches storage; the
//! [`BlogStore`](crate::BlogStore) wrappers load the collection and delegate.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use miniblog_types::Blog;
use serde::{Deserialize, Serialize};

/// Category name that matches every post.
pub const ALL_CATEGORIES: &str = "All";

/// Group name for posts with a blank category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Default snippet length in characters.
pub const SNIPPET_LEN: usize = 100;

/// Which fields a search term is matched against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Title, content, author, or category. This is the home page search;
    /// the categories page's narrower title-or-category rule is not used.
    #[default]
    All,
    /// Title only.
    Title,
    /// Category only.
    Category,
}

impl SearchScope {
    fn matches(self, blog: &Blog, needle: &str) -> bool {
        let has = |field: &str| field.to_lowercase().contains(needle);
        match self {
            Self::All => {
                has(&blog.title) || has(&blog.content) || has(&blog.author) || has(&blog.category)
            }
            Self::Title => has(&blog.title),
            Self::Category => has(&blog.category),
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Title => write!(f, "title"),
            Self::Category => write!(f, "category"),
        }
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "title" => Ok(Self::Title),
            "category" => Ok(Self::Category),
            other => Err(format!("unknown search scope: {other}")),
        }
    }
}

/// A search term combined with a category filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlogQuery {
    term: Option<String>,
    scope: SearchScope,
    category: Option<String>,
}

impl BlogQuery {
    /// A query matching every post.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `term` as a substring. A blank term matches everything.
    pub fn term(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.term = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        self
    }

    pub fn scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Keep only posts whose category equals `category`. [`ALL_CATEGORIES`]
    /// disables the filter.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.eq_ignore_ascii_case(ALL_CATEGORIES))
            .then(|| category.to_lowercase());
        self
    }

    /// Returns `true` if `blog` passes both the term and category filters.
    pub fn matches(&self, blog: &Blog) -> bool {
        let term_ok = self
            .term
            .as_deref()
            .map_or(true, |needle| self.scope.matches(blog, needle));
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |wanted| blog.category.to_lowercase() == wanted);
        term_ok && category_ok
    }

    /// Matching posts, in collection order.
    pub fn apply<'a>(&self, blogs: &'a [Blog]) -> Vec<&'a Blog> {
        blogs.iter().filter(|b| self.matches(b)).collect()
    }
}

/// Posts whose fields in `scope` contain `term`, ignoring case.
pub fn search<'a>(blogs: &'a [Blog], term: &str, scope: SearchScope) -> Vec<&'a Blog> {
    BlogQuery::new().term(term).scope(scope).apply(blogs)
}

/// Posts in `category`, ignoring case. [`ALL_CATEGORIES`] keeps everything.
pub fn filter_by_category<'a>(blogs: &'a [Blog], category: &str) -> Vec<&'a Blog> {
    BlogQuery::new().category(category).apply(blogs)
}

/// Posts grouped by category name, groups sorted by name.
///
/// Only an empty category counts as [`UNCATEGORIZED`]; whitespace is kept
/// as a name of its own.
pub fn group_by_category(blogs: &[Blog]) -> BTreeMap<String, Vec<&Blog>> {
    let mut groups: BTreeMap<String, Vec<&Blog>> = BTreeMap::new();
    for blog in blogs {
        let name = if blog.category.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            blog.category.clone()
        };
        groups.entry(name).or_default().push(blog);
    }
    groups
}

/// The first `max` characters of `content`, with `...` appended when cut.
pub fn snippet(content: &str, max: usize) -> String {
    match content.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
