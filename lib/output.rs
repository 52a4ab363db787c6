//! Reusable output types for CLI commands.
//!
//! These types back the machine-readable form of `claude-setup list`. All
//! collections use object-keyed structures (BTreeMap) instead of arrays for
//! self-describing paths and stable ordering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ComponentCategory};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Full catalog for `claude-setup list --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogOutput {
    /// Components keyed by category name, then component name.
    pub components: BTreeMap<String, BTreeMap<String, ComponentOutput>>,
    /// MCP servers keyed by server name.
    pub mcp_servers: BTreeMap<String, McpServerOutput>,
}

/// Component entry (keyed by component name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentOutput {
    pub description: String,
    pub token_estimate: u64,
    pub path: String,
}

/// MCP server entry (keyed by server name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerOutput {
    pub description: String,
    pub token_usage: u64,
    pub tools_count: u32,
    pub category: String,
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<&Catalog> for CatalogOutput {
    fn from(catalog: &Catalog) -> Self {
        let mut components = BTreeMap::new();
        for category in ComponentCategory::ALL {
            let entries: BTreeMap<String, ComponentOutput> = catalog
                .components(category)
                .iter()
                .map(|c| {
                    (
                        c.name.clone(),
                        ComponentOutput {
                            description: c.description.clone(),
                            token_estimate: c.token_estimate,
                            path: c.source_path.display().to_string(),
                        },
                    )
                })
                .collect();
            components.insert(category.dir_name().to_string(), entries);
        }

        let mcp_servers = catalog
            .mcp_servers
            .iter()
            .map(|s| {
                (
                    s.name.clone(),
                    McpServerOutput {
                        description: s.description.clone(),
                        token_usage: s.token_usage,
                        tools_count: s.tools_count,
                        category: s.category.clone(),
                    },
                )
            })
            .collect();

        Self {
            components,
            mcp_servers,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Component, McpServer};
    use std::path::PathBuf;

    #[test]
    fn test_catalog_output_shape() {
        let catalog = Catalog {
            agents: vec![Component {
                name: "code-reviewer".to_string(),
                category: ComponentCategory::Agents,
                description: "Reviews diffs".to_string(),
                token_estimate: 200,
                source_path: PathBuf::from("agents/code-reviewer.md"),
                content: String::new(),
            }],
            commands: vec![],
            output_styles: vec![],
            mcp_servers: vec![McpServer {
                name: "github".to_string(),
                description: "GitHub integration".to_string(),
                token_usage: 5000,
                tools_count: 12,
                category: "vcs".to_string(),
                use_cases: vec![],
                when_to_load: vec![],
            }],
        };

        let output = CatalogOutput::from(&catalog);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json["components"]["agents"]["code-reviewer"]["token_estimate"],
            200
        );
        assert_eq!(json["mcp_servers"]["github"]["token_usage"], 5000);
        assert!(json["components"]["commands"].as_object().unwrap().is_empty());
    }
}
