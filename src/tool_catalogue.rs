//! Static catalogue of Unity Editor tools.
//!
//! Tool descriptors are declared per category in YAML files under `src/catalogue/`
//! and compiled into the binary. They are parsed once at startup and never mutated.

use crate::tool_schema::SchemaObject;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;

/// A named, schema-described tool the Unity listener can execute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: SchemaObject,
}

/// Tool categories, in the order they appear in the aggregated catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolCategory {
    Core,
    Scene,
    Ui,
    GameObject,
    Prefab,
    Script,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 6] = [
        ToolCategory::Core,
        ToolCategory::Scene,
        ToolCategory::Ui,
        ToolCategory::GameObject,
        ToolCategory::Prefab,
        ToolCategory::Script,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Core => "core",
            ToolCategory::Scene => "scene",
            ToolCategory::Ui => "ui",
            ToolCategory::GameObject => "gameobject",
            ToolCategory::Prefab => "prefab",
            ToolCategory::Script => "script",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            ToolCategory::Core => include_str!("catalogue/core.yaml"),
            ToolCategory::Scene => include_str!("catalogue/scene.yaml"),
            ToolCategory::Ui => include_str!("catalogue/ui.yaml"),
            ToolCategory::GameObject => include_str!("catalogue/gameobject.yaml"),
            ToolCategory::Prefab => include_str!("catalogue/prefab.yaml"),
            ToolCategory::Script => include_str!("catalogue/script.yaml"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("Failed to parse {category} tool catalogue: {source}")]
    Parse {
        category: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Tool in {0} catalogue has an empty name")]
    EmptyName(&'static str),
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),
    #[error("Tool {tool} requires undeclared parameter '{parameter}'")]
    UndeclaredRequired { tool: String, parameter: String },
}

/// The aggregated, immutable tool catalogue
#[derive(Debug, Clone)]
pub struct ToolCatalogue {
    tools: Vec<ToolDescriptor>,
    categories: Vec<(ToolCategory, Range<usize>)>,
}

impl ToolCatalogue {
    /// Parses the embedded catalogue files in `ToolCategory::ALL` order
    pub fn load() -> Result<Self, CatalogueError> {
        let sources: Vec<(ToolCategory, &str)> = ToolCategory::ALL
            .iter()
            .map(|category| (*category, category.source()))
            .collect();
        Self::from_sources(&sources)
    }

    /// Parses YAML tool lists and concatenates them in the given order.
    ///
    /// Names must be non-empty and unique across all sources, and every
    /// required parameter must be declared.
    pub fn from_sources(sources: &[(ToolCategory, &str)]) -> Result<Self, CatalogueError> {
        let mut tools = Vec::new();
        let mut categories = Vec::with_capacity(sources.len());
        let mut seen = HashSet::new();

        for (category, source) in sources {
            let parsed: Vec<ToolDescriptor> =
                serde_yaml::from_str(source).map_err(|source| CatalogueError::Parse {
                    category: category.as_str(),
                    source,
                })?;

            for tool in &parsed {
                if tool.name.trim().is_empty() {
                    return Err(CatalogueError::EmptyName(category.as_str()));
                }
                if !seen.insert(tool.name.clone()) {
                    return Err(CatalogueError::DuplicateTool(tool.name.clone()));
                }
                let schema = &tool.input_schema;
                if let Some(missing) = schema
                    .required
                    .iter()
                    .find(|name| !schema.properties.contains_key(*name))
                {
                    return Err(CatalogueError::UndeclaredRequired {
                        tool: tool.name.clone(),
                        parameter: missing.clone(),
                    });
                }
            }

            let start = tools.len();
            tools.extend(parsed);
            categories.push((*category, start..tools.len()));
        }

        log::debug!("Loaded {} tools in {} categories", tools.len(), categories.len());
        Ok(Self { tools, categories })
    }

    /// All tools, category by category
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn tools_in(&self, category: ToolCategory) -> &[ToolDescriptor] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, range)| &self.tools[range.clone()])
            .unwrap_or(&[])
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
#[path = "tool_catalogue_tests.rs"]
mod tests;
