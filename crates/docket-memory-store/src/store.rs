//! Committed rows plus scope-private staging buffers.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use docket_core::error::DomainError;
use docket_core::repository::{Entity, Participant, Repository};
use uuid::Uuid;

type Rows<T> = Arc<RwLock<BTreeMap<Uuid, T>>>;

/// Mutation recorded by a session, applied to the shared rows at commit.
#[derive(Debug, Clone)]
enum StagedOp<T> {
    Add(T),
    Update(T),
    Delete(Uuid),
}

/// Shared committed state for one entity type.
///
/// Clones are cheap and observe the same rows. Rows are kept in id order,
/// which makes `list` pagination stable.
#[derive(Debug, Clone)]
pub struct MemoryStore<T: Entity> {
    rows: Rows<T>,
}

impl<T: Entity> MemoryStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Opens a scope-private session over this store. The session is both
    /// the `Repository` handed to a use case and the `Participant`
    /// enlisted in its Unit-of-Work scope.
    #[must_use]
    pub fn session(&self) -> Arc<MemorySession<T>> {
        Arc::new(MemorySession {
            rows: Arc::clone(&self.rows),
            staged: Mutex::new(Vec::new()),
        })
    }

    /// Number of committed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the store has no committed rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A scope-private view of a [`MemoryStore`].
///
/// Repository mutations land in a local buffer; they reach the shared
/// rows only through the participant protocol, so an uncommitted scope
/// never leaks state to other scopes.
#[derive(Debug)]
pub struct MemorySession<T: Entity> {
    rows: Rows<T>,
    staged: Mutex<Vec<StagedOp<T>>>,
}

impl<T: Entity> MemorySession<T> {
    fn read_rows(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<Uuid, T>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn staged_ops(&self) -> std::sync::MutexGuard<'_, Vec<StagedOp<T>>> {
        self.staged.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<T: Entity + 'static> Repository<T> for MemorySession<T> {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, DomainError> {
        Ok(self.read_rows().get(&id).cloned())
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<T>, DomainError> {
        Ok(self
            .read_rows()
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn add(&self, entity: T) -> Result<T, DomainError> {
        self.staged_ops().push(StagedOp::Add(entity.clone()));
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, DomainError> {
        self.staged_ops().push(StagedOp::Update(entity.clone()));
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let existed = self.read_rows().contains_key(&id);
        self.staged_ops().push(StagedOp::Delete(id));
        Ok(existed)
    }
}

#[async_trait]
impl<T: Entity + 'static> Participant for MemorySession<T> {
    fn name(&self) -> &str {
        std::any::type_name::<T>()
    }

    async fn prepare(&self) -> Result<(), DomainError> {
        let staged = self.staged_ops();
        let rows = self.read_rows();

        // Replay the buffer against the row keys to catch conflicts
        // before anything becomes visible.
        let mut keys: BTreeSet<Uuid> = rows.keys().copied().collect();
        for op in staged.iter() {
            match op {
                StagedOp::Add(entity) => {
                    if !keys.insert(entity.id()) {
                        return Err(DomainError::Conflict {
                            entity_id: entity.id(),
                            reason: "entity already exists".into(),
                        });
                    }
                }
                StagedOp::Update(entity) => {
                    if !keys.contains(&entity.id()) {
                        return Err(DomainError::EntityNotFound(entity.id()));
                    }
                }
                StagedOp::Delete(id) => {
                    keys.remove(id);
                }
            }
        }
        Ok(())
    }

    fn commit(&self) {
        let mut staged = self.staged_ops();
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        for op in staged.drain(..) {
            match op {
                StagedOp::Add(entity) | StagedOp::Update(entity) => {
                    rows.insert(entity.id(), entity);
                }
                StagedOp::Delete(id) => {
                    rows.remove(&id);
                }
            }
        }
    }

    fn rollback(&self) {
        self.staged_ops().clear();
    }
}
