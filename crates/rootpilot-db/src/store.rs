//! Volatile in-memory entity store.
//!
//! Each entity kind lives in its own [`Table`], an insertion-ordered
//! map behind a `parking_lot::RwLock`. Every single mutation (including
//! its uniqueness check) happens while the write lock is held, so the
//! store itself never observes a torn record. Sequences of calls are not
//! serialized: two callers doing read-then-update on the same id race,
//! and the last write wins.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rootpilot_core::models::{
    action_item::ActionItem, incident::Incident, project::AnalysisProject, rca_result::RcaResult,
    user::User,
};
use tracing::{debug, info};
use uuid::Uuid;

/// A single entity table keyed by id.
pub(crate) struct Table<T> {
    rows: RwLock<IndexMap<Uuid, T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(IndexMap::new()),
        }
    }
}

impl<T: Clone> Table<T> {
    pub(crate) fn get(&self, id: Uuid) -> Option<T> {
        self.rows.read().get(&id).cloned()
    }

    pub(crate) fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().values().find(|row| pred(row)).cloned()
    }

    /// All matching rows, oldest first.
    pub(crate) fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .values()
            .filter(|row| pred(row))
            .cloned()
            .collect()
    }

    /// Insert a row built around a freshly generated id. The id is
    /// guaranteed not to collide with a live row.
    pub(crate) fn insert(&self, build: impl FnOnce(Uuid) -> T) -> T {
        let mut rows = self.rows.write();
        insert_locked(&mut rows, build)
    }

    /// Like [`Table::insert`], but returns `None` without inserting if
    /// any existing row satisfies `conflicts`.
    pub(crate) fn insert_new(
        &self,
        conflicts: impl Fn(&T) -> bool,
        build: impl FnOnce(Uuid) -> T,
    ) -> Option<T> {
        let mut rows = self.rows.write();
        if rows.values().any(|row| conflicts(row)) {
            return None;
        }
        Some(insert_locked(&mut rows, build))
    }

    /// Apply `f` to the row in place and return the updated copy.
    pub(crate) fn modify(&self, id: Uuid, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(&id)?;
        f(row);
        Some(row.clone())
    }

    /// Apply `f` only if `guard` accepts the current row, checked and
    /// applied under one write lock. `Err` carries the untouched row.
    pub(crate) fn modify_if(
        &self,
        id: Uuid,
        guard: impl FnOnce(&T) -> bool,
        f: impl FnOnce(&mut T),
    ) -> Option<Result<T, T>> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(&id)?;
        if !guard(row) {
            return Some(Err(row.clone()));
        }
        f(row);
        Some(Ok(row.clone()))
    }

    /// Remove a row, keeping the relative order of the rest.
    pub(crate) fn remove(&self, id: Uuid) -> bool {
        self.rows.write().shift_remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.read().len()
    }
}

fn insert_locked<T: Clone>(rows: &mut IndexMap<Uuid, T>, build: impl FnOnce(Uuid) -> T) -> T {
    let mut id = Uuid::new_v4();
    while rows.contains_key(&id) {
        id = Uuid::new_v4();
    }
    let row = build(id);
    rows.insert(id, row.clone());
    row
}

#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) users: Table<User>,
    pub(crate) projects: Table<AnalysisProject>,
    pub(crate) incidents: Table<Incident>,
    pub(crate) rca_results: Table<RcaResult>,
    pub(crate) action_items: Table<ActionItem>,
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub users: usize,
    pub projects: usize,
    pub incidents: usize,
    pub rca_results: usize,
    pub action_items: usize,
}

/// Handle to one store instance.
///
/// Cloning is cheap and every clone sees the same data. Separate
/// `MemStore::new()` calls produce fully isolated stores.
#[derive(Clone, Default)]
pub struct MemStore {
    tables: Arc<Tables>,
}

impl MemStore {
    pub fn new() -> Self {
        info!("Initialising in-memory entity store");
        Self::default()
    }

    pub(crate) fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn stats(&self) -> StoreStats {
        let t = &self.tables;
        StoreStats {
            users: t.users.len(),
            projects: t.projects.len(),
            incidents: t.incidents.len(),
            rca_results: t.rca_results.len(),
            action_items: t.action_items.len(),
        }
    }

    /// Log final table sizes. Data is discarded once the last handle
    /// is dropped.
    pub fn shutdown(self) {
        let stats = self.stats();
        debug!(handles = Arc::strong_count(&self.tables), "Releasing store handle");
        info!(
            users = stats.users,
            projects = stats.projects,
            incidents = stats.incidents,
            rca_results = stats.rca_results,
            action_items = stats.action_items,
            "Entity store shut down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: Uuid,
        key: &'static str,
    }

    #[test]
    fn insert_assigns_distinct_ids() {
        let table = Table::<Row>::default();
        let a = table.insert(|id| Row { id, key: "a" });
        let b = table.insert(|id| Row { id, key: "b" });
        assert_ne!(a.id, b.id);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn insert_new_rejects_conflicts() {
        let table = Table::<Row>::default();
        table.insert(|id| Row { id, key: "dup" });
        let second = table.insert_new(|r| r.key == "dup", |id| Row { id, key: "dup" });
        assert!(second.is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn modify_if_respects_guard() {
        let table = Table::<Row>::default();
        let row = table.insert(|id| Row { id, key: "draft" });

        let moved = table.modify_if(row.id, |r| r.key == "draft", |r| r.key = "analyzing");
        assert_eq!(moved.unwrap().unwrap().key, "analyzing");

        let refused = table.modify_if(row.id, |r| r.key == "draft", |r| r.key = "other");
        assert_eq!(refused.unwrap().unwrap_err().key, "analyzing");
        assert_eq!(table.get(row.id).unwrap().key, "analyzing");

        assert!(table.modify_if(Uuid::new_v4(), |_| true, |_| {}).is_none());
    }

    #[test]
    fn remove_preserves_insertion_order() {
        let table = Table::<Row>::default();
        let keys = ["one", "two", "three"];
        let ids: Vec<Uuid> = keys
            .iter()
            .map(|k| table.insert(|id| Row { id, key: *k }).id)
            .collect();

        assert!(table.remove(ids[1]));
        assert!(!table.remove(ids[1]));

        let remaining: Vec<_> = table.filter(|_| true).into_iter().map(|r| r.key).collect();
        assert_eq!(remaining, vec!["one", "three"]);
    }

    #[test]
    fn modify_missing_returns_none() {
        let table = Table::<Row>::default();
        assert!(table.modify(Uuid::new_v4(), |r| r.key = "x").is_none());
    }

    #[test]
    fn clones_share_data() {
        let store = MemStore::new();
        let other = store.clone();
        assert_eq!(store.stats(), other.stats());
        assert_eq!(store.stats().users, 0);
    }
}
