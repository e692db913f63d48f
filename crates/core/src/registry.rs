//! Effect registry: id → factory.
//!
//! Factories produce fresh, uninitialized instances. Registration instantiates
//! once to read the metadata id. All access goes through one mutex, so a shared
//! registry can be read and extended from several threads.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::effect::Effect;
use crate::error::RegistryError;
use crate::types::EffectMetadata;

/// Produces a new effect instance per call.
pub type EffectFactory = Arc<dyn Fn() -> Box<dyn Effect> + Send + Sync>;

#[derive(Default)]
struct Entries {
    factories: HashMap<String, EffectFactory>,
    order: Vec<String>,
}

#[derive(Default)]
pub struct Registry {
    entries: Mutex<Entries>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under the id its instances report.
    pub fn register<F>(&self, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn Effect> + Send + Sync + 'static,
    {
        self.register_factory(Arc::new(factory))
    }

    pub fn register_factory(&self, factory: EffectFactory) -> Result<(), RegistryError> {
        let id = factory().metadata().id;
        if id.is_empty() {
            return Err(RegistryError::EmptyId);
        }

        let mut entries = self.entries.lock();
        if entries.factories.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }
        debug!("registered effect {id}");
        entries.order.push(id.clone());
        entries.factories.insert(id, factory);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<EffectFactory, RegistryError> {
        self.entries
            .lock()
            .factories
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Build a fresh instance for `id`.
    pub fn create(&self, id: &str) -> Result<Box<dyn Effect>, RegistryError> {
        let factory = self.get(id)?;
        Ok(factory())
    }

    /// Metadata of every effect, in registration order.
    pub fn list(&self) -> Vec<EffectMetadata> {
        self.factories_in_order()
            .into_iter()
            .map(|factory| factory().metadata())
            .collect()
    }

    /// Metadata sorted by Chinese display name.
    pub fn list_sorted(&self) -> Vec<EffectMetadata> {
        let mut list = self.list();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.lock().order.clone()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().order.len()
    }

    pub fn has(&self, id: &str) -> bool {
        self.entries.lock().factories.contains_key(id)
    }

    fn factories_in_order(&self) -> Vec<EffectFactory> {
        let entries = self.entries.lock();
        entries
            .order
            .iter()
            .filter_map(|id| entries.factories.get(id).cloned())
            .collect()
    }
}
