use std::sync::{Mutex, MutexGuard};

use miniblog_types::{
    Blog, BlogId, BlogPatch, Clock, CommentId, NewBlog, NewComment, SystemClock,
};
use tracing::{debug, info, warn};

use crate::config::{CorruptDataPolicy, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::query::{BlogQuery, SearchScope};
use crate::seed::{seed_blogs, SEED_LEN};
use crate::traits::SlotStorage;

/// Outcome of [`BlogStore::delete_blog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deletion {
    /// The record that was removed, with its comments. `None` if no blog
    /// had the requested id.
    pub removed: Option<Blog>,
    /// The collection as persisted after the call.
    pub remaining: Vec<Blog>,
}

impl Deletion {
    /// Returns `true` if a blog was actually removed.
    pub fn is_deleted(&self) -> bool {
        self.removed.is_some()
    }
}

/// Sole authority over the persisted blog collection.
///
/// The whole collection lives in one slot of a [`SlotStorage`] and every
/// operation is a self-contained read-modify-write of that slot. There is no
/// cache: each call re-reads the slot, so it observes every earlier write
/// made through any handle to the same storage in this process.
///
/// Operations hold an internal lock for their full duration, which makes
/// them atomic with respect to each other when a store is shared between
/// threads. Separate processes writing the same slot are not coordinated;
/// the last writer wins.
pub struct BlogStore<S> {
    slot: S,
    config: StoreConfig,
    clock: Box<dyn Clock>,
    guard: Mutex<()>,
}

impl<S: SlotStorage> BlogStore<S> {
    /// Create a store over `slot` with the default configuration and the
    /// system clock.
    pub fn new(slot: S) -> Self {
        Self {
            slot,
            config: StoreConfig::default(),
            clock: Box::new(SystemClock),
            guard: Mutex::new(()),
        }
    }

    /// Create a store with an explicit configuration.
    pub fn with_config(slot: S, config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(slot)
        })
    }

    /// Replace the time source used to stamp new records.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The underlying slot storage.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ---- Blogs ----

    /// Every blog in persisted (insertion) order.
    ///
    /// The first read of an empty slot seeds it with the example posts.
    pub fn list_blogs(&self) -> StoreResult<Vec<Blog>> {
        let _guard = self.lock()?;
        self.load()
    }

    /// The blog with `id`, or `None`.
    pub fn get_blog_by_id(&self, id: BlogId) -> StoreResult<Option<Blog>> {
        let _guard = self.lock()?;
        Ok(self.load()?.into_iter().find(|b| b.id == id))
    }

    /// Append a new blog with the next id and today's date.
    ///
    /// Fails with [`StoreError::Ids`] without writing if the highest stored
    /// id is `u64::MAX`.
    pub fn create_blog(&self, new: NewBlog) -> StoreResult<Blog> {
        let _guard = self.lock()?;
        let mut blogs = self.load()?;
        let id = BlogId::next_after(blogs.iter().map(|b| b.id))?;
        let blog = Blog::from_new(id, self.clock.today(), new);
        blogs.push(blog.clone());
        self.persist(&blogs)?;
        debug!(id = %id, "blog created");
        Ok(blog)
    }

    /// Merge `patch` onto the blog with `id`.
    ///
    /// Returns `None` without writing if no such blog exists.
    pub fn update_blog(&self, id: BlogId, patch: BlogPatch) -> StoreResult<Option<Blog>> {
        self.modify(id, |blog| {
            patch.apply_to(blog);
            Ok(())
        })
    }

    /// Remove the blog with `id` together with its comments.
    ///
    /// The collection is persisted whether or not anything matched.
    pub fn delete_blog(&self, id: BlogId) -> StoreResult<Deletion> {
        let _guard = self.lock()?;
        let mut blogs = self.load()?;
        let removed = blogs
            .iter()
            .position(|b| b.id == id)
            .map(|index| blogs.remove(index));
        self.persist(&blogs)?;
        debug!(id = %id, deleted = removed.is_some(), "blog delete");
        Ok(Deletion {
            removed,
            remaining: blogs,
        })
    }

    // ---- Comments ----

    /// Append a comment to the blog with `blog_id` and return the updated
    /// blog.
    ///
    /// Returns `None` without writing if no such blog exists, and
    /// [`StoreError::Ids`] without writing if the blog's comment ids are
    /// used up.
    pub fn add_comment(&self, blog_id: BlogId, new: NewComment) -> StoreResult<Option<Blog>> {
        let now = self.clock.now();
        self.modify(blog_id, |blog| {
            let comment_id = blog.push_comment(now, new)?;
            debug!(blog = %blog_id, comment = %comment_id, "comment added");
            Ok(())
        })
    }

    /// Remove a comment from the blog with `blog_id` and return the updated
    /// blog. A missing comment id leaves the blog unchanged.
    ///
    /// Returns `None` without writing if no such blog exists.
    pub fn delete_comment(
        &self,
        blog_id: BlogId,
        comment_id: CommentId,
    ) -> StoreResult<Option<Blog>> {
        self.modify(blog_id, |blog| {
            let removed = blog.remove_comment(comment_id);
            debug!(blog = %blog_id, comment = %comment_id, removed, "comment delete");
            Ok(())
        })
    }

    // ---- Queries ----

    /// Blogs passing `query`, in persisted order.
    pub fn query(&self, query: &BlogQuery) -> StoreResult<Vec<Blog>> {
        Ok(self
            .list_blogs()?
            .into_iter()
            .filter(|b| query.matches(b))
            .collect())
    }

    /// Blogs whose fields in `scope` contain `term`.
    pub fn search(&self, term: &str, scope: SearchScope) -> StoreResult<Vec<Blog>> {
        self.query(&BlogQuery::new().term(term).scope(scope))
    }

    /// Blogs in `category`.
    pub fn by_category(&self, category: &str) -> StoreResult<Vec<Blog>> {
        self.query(&BlogQuery::new().category(category))
    }

    // ---- Internals ----

    fn lock(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.guard
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    /// Locate one blog, mutate it, persist, and return the new version.
    fn modify<F>(&self, id: BlogId, f: F) -> StoreResult<Option<Blog>>
    where
        F: FnOnce(&mut Blog) -> StoreResult<()>,
    {
        let _guard = self.lock()?;
        let mut blogs = self.load()?;
        let Some(blog) = blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        f(blog)?;
        let updated = blog.clone();
        self.persist(&blogs)?;
        Ok(Some(updated))
    }

    /// Initialize-or-load. Caller must hold the guard.
    fn load(&self) -> StoreResult<Vec<Blog>> {
        let key = &self.config.slot_key;
        let raw = match self.slot.read(key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return self.seed(),
        };

        match serde_json::from_str::<Vec<Blog>>(&raw) {
            Ok(blogs) => Ok(blogs),
            Err(e) => match self.config.on_corrupt {
                CorruptDataPolicy::Fail => Err(StoreError::Corrupt {
                    key: key.clone(),
                    reason: e.to_string(),
                }),
                CorruptDataPolicy::Reseed => {
                    warn!(key = %key, error = %e, "discarding corrupt slot and reseeding");
                    self.seed()
                }
            },
        }
    }

    fn seed(&self) -> StoreResult<Vec<Blog>> {
        let blogs = seed_blogs()?;
        self.persist(&blogs)?;
        info!(key = %self.config.slot_key, count = SEED_LEN, "seeded empty slot");
        Ok(blogs)
    }

    fn persist(&self, blogs: &[Blog]) -> StoreResult<()> {
        let json =
            serde_json::to_string(blogs).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.slot.write(&self.config.slot_key, &json)?;
        debug!(key = %self.config.slot_key, count = blogs.len(), "collection persisted");
        Ok(())
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for BlogStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogStore")
            .field("slot", &self.slot)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
