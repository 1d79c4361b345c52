// src/scenery/registry.rs
//! Data-driven tree templates + loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::core::TreeTemplateId;

// ---------- Public plugin to register asset+loader ----------

pub struct TreeRegistryAssetPlugin;

impl Plugin for TreeRegistryAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<TreeRegistry>()
            .register_asset_loader(TreeRegistryLoader);
    }
}

// ---------- Render refs (data form) ----------

/// Visual representation of a template.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RenderRef {
    Scene { path: String },
    MeshMaterial { mesh: String, material: Option<String> },
}

// ---------- Template definition (data form) ----------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeTemplateDef {
    /// Unique human-readable name (used for lookup).
    pub name: String,
    /// Visual representation.
    pub render: RenderRef,
}

// ---------- Runtime registry asset ----------

#[derive(Asset, TypePath, Clone, Debug)]
pub struct TreeRegistry {
    /// Ordered list; index in this vector is the `TreeTemplateId.0`.
    pub templates: Vec<TreeTemplateDef>,
    /// Name -> index for quick lookups.
    pub name_to_index: HashMap<String, u32>,
}

impl TreeRegistry {
    /// Build from parsed defs, rejecting duplicate names.
    pub fn from_defs(defs: Vec<TreeTemplateDef>) -> Result<Self, TreeRegistryLoadError> {
        let mut name_to_index = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            if let Some(prev) = name_to_index.insert(def.name.clone(), i as u32) {
                return Err(TreeRegistryLoadError::DuplicateName {
                    name: def.name.clone(),
                    first: prev,
                    second: i as u32,
                });
            }
        }
        Ok(Self { templates: defs, name_to_index })
    }

    pub fn index_of(&self, name: &str) -> Option<TreeTemplateId> {
        self.name_to_index.get(name).map(|&i| TreeTemplateId(i))
    }

    pub fn get(&self, id: TreeTemplateId) -> Option<&TreeTemplateDef> {
        self.templates.get(id.0 as usize)
    }
}

// ---------- Asset loader for `.scenery.ron` ----------

#[derive(Default)]
pub struct TreeRegistryLoader;

impl AssetLoader for TreeRegistryLoader {
    type Asset = TreeRegistry;
    type Settings = ();
    type Error = TreeRegistryLoadError;

    fn extensions(&self) -> &[&str] {
        &["scenery.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let defs: Vec<TreeTemplateDef> =
            ron::de::from_bytes(&bytes).map_err(|e| TreeRegistryLoadError::Ron(e.to_string()))?;
        TreeRegistry::from_defs(defs)
    }
}

// ---------- Loader errors ----------

#[derive(thiserror::Error, Debug)]
pub enum TreeRegistryLoadError {
    #[error("I/O while reading registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("Duplicate template name '{name}' (first idx {first}, second idx {second})")]
    DuplicateName { name: String, first: u32, second: u32 },
}
