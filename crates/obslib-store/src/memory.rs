use std::collections::HashMap;
use std::sync::RwLock;

use obslib_types::DataModel;

use crate::error::StoreResult;
use crate::traits::ModelStore;

/// Resident, HashMap-based model store.
///
/// Models stay in process memory for the store's lifetime. `get` clones
/// the single resident copy; `set` overwrites it.
pub struct InMemoryModelStore {
    models: RwLock<HashMap<usize, DataModel>>,
}

impl InMemoryModelStore {
    /// Create a new empty resident store.
    pub fn new() -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelStore for InMemoryModelStore {
    fn get(&self, index: usize) -> StoreResult<Option<DataModel>> {
        let map = self.models.read().expect("lock poisoned");
        Ok(map.get(&index).cloned())
    }

    fn set(&self, index: usize, model: &DataModel) -> StoreResult<()> {
        let mut map = self.models.write().expect("lock poisoned");
        map.insert(index, model.clone());
        Ok(())
    }

    fn contains(&self, index: usize) -> bool {
        let map = self.models.read().expect("lock poisoned");
        map.contains_key(&index)
    }

    fn remove(&self, index: usize) -> StoreResult<bool> {
        let mut map = self.models.write().expect("lock poisoned");
        Ok(map.remove(&index).is_some())
    }

    fn len(&self) -> usize {
        self.models.read().expect("lock poisoned").len()
    }
}

impl std::fmt::Debug for InMemoryModelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryModelStore")
            .field("model_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_model(tag: &str) -> DataModel {
        let mut model = DataModel::default();
        model.meta.filename = Some(format!("{tag}.json"));
        model.data = serde_json::json!({"tag": tag});
        model
    }

    #[test]
    fn set_and_get() {
        let store = InMemoryModelStore::new();
        let model = make_model("a");
        store.set(0, &model).unwrap();

        let read_back = store.get(0).unwrap().expect("slot should exist");
        assert_eq!(read_back, model);
    }

    #[test]
    fn get_missing_index_returns_none() {
        let store = InMemoryModelStore::new();
        assert!(store.get(7).unwrap().is_none());
    }

    #[test]
    fn set_replaces_slot_contents() {
        let store = InMemoryModelStore::new();
        store.set(0, &make_model("old")).unwrap();
        store.set(0, &make_model("new")).unwrap();

        let read_back = store.get(0).unwrap().unwrap();
        assert_eq!(read_back.meta.filename.as_deref(), Some("new.json"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn contains_and_remove() {
        let store = InMemoryModelStore::new();
        store.set(3, &make_model("x")).unwrap();
        assert!(store.contains(3));
        assert!(store.remove(3).unwrap());
        assert!(!store.contains(3));
        assert!(!store.remove(3).unwrap());
    }

    #[test]
    fn len_counts_indices() {
        let store = InMemoryModelStore::new();
        assert!(store.is_empty());
        store.set(0, &make_model("a")).unwrap();
        store.set(5, &make_model("b")).unwrap();
        assert_eq!(store.len(), 2);
    }
}
