//! Analysis result caching
//!
//! Caches analysis results keyed by document path and invalidated by a hash of
//! the document bytes, so unchanged documents (and images in particular, which
//! need a full OCR run) are not analyzed again.

use crate::ocr::OcrOptions;
use crate::AnalysisResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

const CACHE_VERSION: u32 = 1;
pub const CACHE_FILENAME: &str = ".legible-cache.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    /// SHA256 hash of the document bytes
    content_hash: String,
    /// OCR settings the result was produced with (images only)
    ocr_settings: Option<String>,
    result: AnalysisResult,
    /// Seconds since the epoch
    cached_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheData {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

impl Default for CacheData {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// Cache manager for analysis results
pub struct AnalysisCache {
    cache_path: PathBuf,
    data: CacheData,
    /// Whether the cache has been modified
    dirty: bool,
    enabled: bool,
}

impl AnalysisCache {
    /// Open the cache in `project_root`. A missing, unreadable or outdated
    /// cache file starts an empty cache.
    pub fn new(project_root: &Path) -> Self {
        let cache_path = project_root.join(CACHE_FILENAME);
        let data = Self::load_cache(&cache_path).unwrap_or_default();
        debug!(cache = %cache_path.display(), entries = data.entries.len(), "cache opened");

        Self {
            cache_path,
            data,
            dirty: false,
            enabled: true,
        }
    }

    /// Create a disabled cache (no-op)
    pub fn disabled() -> Self {
        Self {
            cache_path: PathBuf::new(),
            data: CacheData::default(),
            dirty: false,
            enabled: false,
        }
    }

    fn load_cache(path: &Path) -> Option<CacheData> {
        let content = fs::read_to_string(path).ok()?;
        let data: CacheData = serde_json::from_str(&content).ok()?;
        if data.version != CACHE_VERSION {
            return None;
        }
        Some(data)
    }

    /// Save cache to disk
    pub fn save(&self) -> Result<()> {
        if !self.enabled || !self.dirty {
            return Ok(());
        }

        let content =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize cache")?;
        fs::write(&self.cache_path, content)
            .with_context(|| format!("Failed to write cache to {}", self.cache_path.display()))?;

        Ok(())
    }

    fn hash_content(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }

    /// Settings string for OCR results; text documents have none
    pub fn ocr_settings(options: &OcrOptions) -> String {
        format!("{}:{}:{}", options.command, options.language, options.psm)
    }

    /// Get cached result if still valid
    pub fn get(
        &self,
        path: &Path,
        content: &[u8],
        ocr_settings: Option<&str>,
    ) -> Option<AnalysisResult> {
        if !self.enabled {
            return None;
        }

        let key = path.to_string_lossy().to_string();
        let entry = self.data.entries.get(&key)?;

        if entry.content_hash != Self::hash_content(content) {
            return None;
        }
        if entry.ocr_settings.as_deref() != ocr_settings {
            return None;
        }

        Some(entry.result.clone())
    }

    /// Store analysis result in cache
    pub fn set(
        &mut self,
        path: &Path,
        content: &[u8],
        ocr_settings: Option<&str>,
        result: AnalysisResult,
    ) {
        if !self.enabled {
            return;
        }

        let key = path.to_string_lossy().to_string();
        let entry = CacheEntry {
            content_hash: Self::hash_content(content),
            ocr_settings: ocr_settings.map(str::to_string),
            result,
            cached_at: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        };

        self.data.entries.insert(key, entry);
        self.dirty = true;
    }

    /// Remove entries for documents that no longer exist
    pub fn cleanup(&mut self, existing_files: &[PathBuf]) {
        if !self.enabled {
            return;
        }

        let existing: std::collections::HashSet<String> = existing_files
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();

        let before = self.data.entries.len();
        self.data.entries.retain(|k, _| existing.contains(k));
        if self.data.entries.len() != before {
            self.dirty = true;
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.data.entries.len(),
            enabled: self.enabled,
        }
    }

    /// Clear all cached entries
    pub fn clear(&mut self) {
        self.data.entries.clear();
        self.dirty = true;
    }
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub entries: usize,
    pub enabled: bool,
}
