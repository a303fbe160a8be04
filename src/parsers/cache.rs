use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

const DEFAULT_MAX_MEMORY_ENTRIES: usize = 1000;

/// Imports of one file, valid while its modification time and size match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedImports {
    pub imports: Vec<String>,
    pub timestamp: u64,
    pub file_size: u64,
}

/// Import lists keyed by source path, held in memory and mirrored to disk
/// on a best-effort basis so later runs can skip parsing unchanged files.
pub struct ImportCache {
    memory_cache: HashMap<PathBuf, CachedImports>,
    cache_dir: Option<PathBuf>,
    max_memory_entries: usize,
}

impl ImportCache {
    pub fn new(cache_dir: PathBuf) -> Self {
        let cache_dir = match fs::create_dir_all(&cache_dir) {
            Ok(()) => Some(cache_dir),
            Err(err) => {
                tracing::warn!(
                    dir = %cache_dir.display(),
                    error = %err,
                    "failed to initialize disk import cache"
                );
                None
            }
        };

        Self {
            memory_cache: HashMap::with_capacity(DEFAULT_MAX_MEMORY_ENTRIES),
            cache_dir,
            max_memory_entries: DEFAULT_MAX_MEMORY_ENTRIES,
        }
    }

    pub fn in_memory_only() -> Self {
        Self {
            memory_cache: HashMap::with_capacity(DEFAULT_MAX_MEMORY_ENTRIES),
            cache_dir: None,
            max_memory_entries: DEFAULT_MAX_MEMORY_ENTRIES,
        }
    }

    /// Returns the cached imports of `file_path` if the file is unchanged
    /// since they were stored.
    pub fn get(&mut self, file_path: &Path) -> Result<Option<Vec<String>>> {
        let (timestamp, file_size) = file_stamp(file_path)?;
        let fresh = |entry: &CachedImports| {
            entry.timestamp == timestamp && entry.file_size == file_size
        };

        if let Some(entry) = self.memory_cache.get(file_path) {
            return Ok(fresh(entry).then(|| entry.imports.clone()));
        }

        let Some(cache_path) = self.cache_path(file_path) else {
            return Ok(None);
        };
        if !cache_path.exists() {
            return Ok(None);
        }

        let entry = self.load_from_disk(&cache_path)?;
        if !fresh(&entry) {
            return Ok(None);
        }
        let imports = entry.imports.clone();
        if self.memory_cache.len() < self.max_memory_entries {
            self.memory_cache.insert(file_path.to_path_buf(), entry);
        }
        Ok(Some(imports))
    }

    pub fn store(&mut self, file_path: &Path, imports: &[String]) -> Result<()> {
        let (timestamp, file_size) = file_stamp(file_path)?;
        let entry = CachedImports {
            imports: imports.to_vec(),
            timestamp,
            file_size,
        };

        if self.memory_cache.len() >= self.max_memory_entries {
            if let Some(key) = self.memory_cache.keys().next().cloned() {
                self.memory_cache.remove(&key);
            }
        }

        if let Some(cache_path) = self.cache_path(file_path) {
            self.store_to_disk(&cache_path, &entry)?;
        }
        self.memory_cache.insert(file_path.to_path_buf(), entry);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.memory_cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory_cache.is_empty()
    }

    fn cache_path(&self, file_path: &Path) -> Option<PathBuf> {
        let cache_dir = self.cache_dir.as_ref()?;

        let mut hasher = DefaultHasher::new();
        file_path.hash(&mut hasher);
        let hash = hasher.finish();

        Some(cache_dir.join(format!("imports_{:x}.bincode", hash)))
    }

    fn load_from_disk(&self, cache_path: &Path) -> Result<CachedImports> {
        let data = fs::read(cache_path)?;
        let entry: CachedImports = bincode::deserialize(&data)?;
        Ok(entry)
    }

    fn store_to_disk(&self, cache_path: &Path, entry: &CachedImports) -> Result<()> {
        let data = bincode::serialize(entry)?;
        fs::write(cache_path, data)?;
        Ok(())
    }
}

fn file_stamp(file_path: &Path) -> Result<(u64, u64)> {
    let metadata = fs::metadata(file_path)?;
    let timestamp = metadata
        .modified()?
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    Ok((timestamp, metadata.len()))
}
