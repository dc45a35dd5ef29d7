//! In-memory store - used when no database is configured, and in tests.
//!
//! All tables live behind a single async `RwLock`, so every repository call
//! sees a consistent snapshot. Unique constraints and post cascades mirror
//! the PostgreSQL schema.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tabloid_core::domain::{
    Category, Comment, Post, PostReaction, PostTag, Reaction, Subscription, Tag, UserProfile,
};
use tabloid_core::error::RepoError;
use tabloid_core::ports::BaseRepository;

/// Rows of one table plus its identity sequence.
pub struct Table<T> {
    pub(crate) rows: Vec<T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

#[derive(Default)]
pub struct Tables {
    pub(crate) user_profiles: Table<UserProfile>,
    pub(crate) categories: Table<Category>,
    pub(crate) posts: Table<Post>,
    pub(crate) comments: Table<Comment>,
    pub(crate) tags: Table<Tag>,
    pub(crate) post_tags: Table<PostTag>,
    pub(crate) subscriptions: Table<Subscription>,
    pub(crate) reactions: Table<Reaction>,
    pub(crate) post_reactions: Table<PostReaction>,
}

/// Shared state behind every in-memory repository.
#[derive(Default)]
pub struct InMemoryStore {
    pub(crate) tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// An entity that can be kept in the in-memory store.
pub trait Stored: Clone + Send + Sync + 'static {
    const NAME: &'static str;

    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    /// Whether `self` would violate a unique constraint held by `other`.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    /// Remove rows that reference the deleted row `id`.
    fn cascade_delete(_tables: &mut Tables, _id: i32) {}
}

/// Generic in-memory repository implementation.
pub struct InMemoryRepository<T> {
    pub(crate) store: Arc<InMemoryStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Stored> InMemoryRepository<T> {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Rows matching `predicate`, in insertion order.
    pub(crate) async fn select<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let tables = self.store.tables.read().await;
        T::table(&tables)
            .rows
            .iter()
            .filter(|&row| predicate(row))
            .cloned()
            .collect()
    }

    pub(crate) async fn select_one<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let tables = self.store.tables.read().await;
        T::table(&tables).rows.iter().find(|&row| predicate(row)).cloned()
    }
}

#[async_trait]
impl<T: Stored> BaseRepository<T, i32> for InMemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError> {
        Ok(self.select_one(|row| row.id() == id).await)
    }

    async fn add(&self, mut entity: T) -> Result<T, RepoError> {
        let mut tables = self.store.tables.write().await;
        let table = T::table_mut(&mut tables);

        if table.rows.iter().any(|row| entity.conflicts_with(row)) {
            return Err(RepoError::Constraint(format!("{} already exists", T::NAME)));
        }

        entity.set_id(table.next_id);
        table.next_id += 1;
        table.rows.push(entity.clone());

        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut tables = self.store.tables.write().await;
        let table = T::table_mut(&mut tables);

        if table
            .rows
            .iter()
            .any(|row| row.id() != entity.id() && entity.conflicts_with(row))
        {
            return Err(RepoError::Constraint(format!("{} already exists", T::NAME)));
        }

        let slot = table
            .rows
            .iter_mut()
            .find(|row| row.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();

        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        let table = T::table_mut(&mut tables);

        let before = table.rows.len();
        table.rows.retain(|row| row.id() != id);
        if table.rows.len() == before {
            return Err(RepoError::NotFound);
        }

        T::cascade_delete(&mut tables, id);
        Ok(())
    }
}
