//! Career Model Registry — per-career weight vectors loaded once at startup.
//!
//! `CareerRegistry` is immutable after construction. Hot reload goes through
//! `SharedRegistry`, which swaps the whole registry behind an `Arc` so
//! in-flight requests keep the snapshot they started with.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::recommendation::features::{self, SCHEMA_VERSION};

/// Registry compiled into the binary, used when no `CAREER_MODELS_PATH` is set.
pub const BUNDLED_CAREERS: &str = include_str!("../../data/careers.json");

/// A single career: sparse weights over the feature schema plus a bias term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerModel {
    pub title: String,
    /// Explanation template; `{reasons}` is replaced by the formatter.
    pub description: String,
    #[serde(default)]
    pub bias: f64,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

impl CareerModel {
    /// Weight for `feature`; features without an explicit weight count as zero.
    pub fn weight(&self, feature: &str) -> f64 {
        self.weights.get(feature).copied().unwrap_or(0.0)
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("career title must not be empty");
        }
        if !self.bias.is_finite() {
            bail!("career '{}' has a non-finite bias", self.title);
        }
        for (feature, weight) in &self.weights {
            if !features::is_declared(feature) {
                bail!(
                    "career '{}' weights unknown feature '{feature}'",
                    self.title
                );
            }
            if !weight.is_finite() {
                bail!(
                    "career '{}' has a non-finite weight for '{feature}'",
                    self.title
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryDocument {
    schema_version: String,
    careers: Vec<CareerModel>,
}

#[derive(Debug, Clone)]
pub struct CareerRegistry {
    models: Vec<CareerModel>,
    index: HashMap<String, usize>,
}

impl CareerRegistry {
    /// Validates and indexes `models`, preserving their order.
    pub fn from_models(models: Vec<CareerModel>) -> Result<Self> {
        let mut index = HashMap::with_capacity(models.len());
        for (position, model) in models.iter().enumerate() {
            model.validate()?;
            if index.insert(model.title.clone(), position).is_some() {
                bail!("duplicate career title '{}'", model.title);
            }
        }
        Ok(Self { models, index })
    }

    pub fn from_json(document: &str) -> Result<Self> {
        let doc: RegistryDocument =
            serde_json::from_str(document).context("Career registry is not valid JSON")?;
        if doc.schema_version != SCHEMA_VERSION {
            bail!(
                "career registry schema '{}' does not match feature schema '{SCHEMA_VERSION}'",
                doc.schema_version
            );
        }
        Self::from_models(doc.careers)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read career registry {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Invalid career registry {}", path.display()))
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CAREERS).context("Bundled career registry is invalid")
    }

    pub fn get(&self, title: &str) -> Result<&CareerModel, AppError> {
        self.index
            .get(title)
            .map(|&i| &self.models[i])
            .ok_or_else(|| AppError::NotFound(format!("Career '{title}' not found")))
    }

    /// All models in insertion order.
    pub fn list(&self) -> &[CareerModel] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared registry (copy-and-swap reload)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrySource {
    Bundled,
    File(PathBuf),
}

impl RegistrySource {
    pub fn load(&self) -> Result<CareerRegistry> {
        match self {
            RegistrySource::Bundled => CareerRegistry::bundled(),
            RegistrySource::File(path) => CareerRegistry::from_file(path),
        }
    }
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrySource::Bundled => write!(f, "bundled"),
            RegistrySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct SharedRegistry {
    source: RegistrySource,
    current: RwLock<Arc<CareerRegistry>>,
}

impl SharedRegistry {
    pub fn load(source: RegistrySource) -> Result<Self> {
        let registry = source.load()?;
        Ok(Self::new(source, registry))
    }

    pub fn new(source: RegistrySource, registry: CareerRegistry) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// Snapshot of the registry; unaffected by later reloads.
    pub fn current(&self) -> Arc<CareerRegistry> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, registry: CareerRegistry) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(registry);
    }

    /// Re-reads the source. On failure the previous registry stays in place.
    pub fn reload(&self) -> Result<usize> {
        let registry = self.source.load()?;
        let count = registry.len();
        self.replace(registry);
        info!(source = %self.source, careers = count, "Career registry reloaded");
        Ok(count)
    }
}
