use super::params::{ForceFieldTable, ParamLoadError, table_id_for};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Identifier-to-table mapping of the force fields available to a caller.
///
/// Tables are shared through [`Arc`], so replacing an entry never disturbs a
/// scoring call that still holds the previous table.
#[derive(Debug, Clone, Default)]
pub struct ForceFieldRegistry {
    registry: BTreeMap<String, Arc<ForceFieldTable>>,
}

impl ForceFieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` file in `dir` as a force field table.
    ///
    /// Each table is registered under its file name up to the first `.`
    /// (`bude_2016v1.json` becomes `bude_2016v1`).
    pub fn load_dir(dir: &Path) -> Result<Self, ParamLoadError> {
        let entries = std::fs::read_dir(dir).map_err(|e| ParamLoadError::Io {
            path: dir.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut registry = Self::new();
        for entry in entries {
            let path = entry
                .map_err(|e| ParamLoadError::Io {
                    path: dir.to_string_lossy().to_string(),
                    source: e,
                })?
                .path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let table = ForceFieldTable::load(&path)?;
            debug!(
                "Loaded force field '{}' with {} records from {:?}.",
                table.name(),
                table.len(),
                path
            );
            registry.insert(table_id_for(&path), table);
        }
        Ok(registry)
    }

    /// Registers `table` under `id`, returning the table it replaced.
    pub fn insert(&mut self, id: String, table: ForceFieldTable) -> Option<Arc<ForceFieldTable>> {
        self.registry.insert(id, Arc::new(table))
    }

    pub fn get(&self, id: &str) -> Option<Arc<ForceFieldTable>> {
        self.registry.get(id).cloned()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
