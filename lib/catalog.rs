//! Component and MCP server catalogs.
//!
//! Catalogs are loaded once from the setup root at startup and are immutable
//! afterwards. Components are discovered as `*.md` files under per-category
//! directories; MCP servers are declared by a `config.json` manifest per
//! server directory. A missing directory yields an empty catalog, and one bad
//! server manifest never blocks the rest.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use walkdir::WalkDir;

use crate::constants::{
    AGENT_TOKEN_ESTIMATE, COMMAND_TOKEN_ESTIMATE, MCP_CONFIG_FILE, MCP_SERVERS_DIR,
    OUTPUT_STYLE_TOKEN_ESTIMATE,
};
use crate::error::{SetupError, SetupResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The three text-component categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentCategory {
    Agents,
    Commands,
    OutputStyles,
}

/// A text-based prompt fragment (agent, command, or output style).
#[derive(Debug, Clone)]
pub struct Component {
    /// File stem, unique within its category.
    pub name: String,
    pub category: ComponentCategory,
    /// First content line of the file, or a per-category fallback.
    pub description: String,
    /// Flat per-category token estimate.
    pub token_estimate: u64,
    pub source_path: PathBuf,
    pub content: String,
}

/// An MCP server integration declared by a JSON manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServer {
    pub name: String,
    pub description: String,
    pub token_usage: u64,
    pub tools_count: u32,
    pub category: String,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub when_to_load: Vec<String>,
}

/// All loadable components and MCP servers, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub agents: Vec<Component>,
    pub commands: Vec<Component>,
    pub output_styles: Vec<Component>,
    pub mcp_servers: Vec<McpServer>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ComponentCategory {
    /// All categories, in display order.
    pub const ALL: [ComponentCategory; 3] = [Self::Agents, Self::Commands, Self::OutputStyles];

    /// Directory name under the setup root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Agents => "agents",
            Self::Commands => "commands",
            Self::OutputStyles => "output-styles",
        }
    }

    /// Human-readable category name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Agents => "Agents",
            Self::Commands => "Commands",
            Self::OutputStyles => "Output Styles",
        }
    }

    /// Subsection heading used in the generated artifact.
    /// The output-style heading is singular.
    pub fn section_heading(&self) -> &'static str {
        match self {
            Self::Agents => "Agents",
            Self::Commands => "Commands",
            Self::OutputStyles => "Output Style",
        }
    }

    /// Flat token estimate per selected item in this category.
    pub fn token_estimate(&self) -> u64 {
        match self {
            Self::Agents => AGENT_TOKEN_ESTIMATE,
            Self::Commands => COMMAND_TOKEN_ESTIMATE,
            Self::OutputStyles => OUTPUT_STYLE_TOKEN_ESTIMATE,
        }
    }
}

impl Catalog {
    /// Load all catalogs from the setup root.
    ///
    /// An absent root or category directory yields empty catalogs, not an
    /// error; the CLI layer rejects a missing root before calling this so the
    /// loader itself stays usable against arbitrary paths in tests.
    pub fn load(setup_root: &Path) -> SetupResult<Self> {
        Ok(Self {
            agents: load_category(setup_root, ComponentCategory::Agents)?,
            commands: load_category(setup_root, ComponentCategory::Commands)?,
            output_styles: load_category(setup_root, ComponentCategory::OutputStyles)?,
            mcp_servers: load_mcp_servers(setup_root)?,
        })
    }

    /// Components for one category, sorted by name.
    pub fn components(&self, category: ComponentCategory) -> &[Component] {
        match category {
            ComponentCategory::Agents => &self.agents,
            ComponentCategory::Commands => &self.commands,
            ComponentCategory::OutputStyles => &self.output_styles,
        }
    }

    /// Look up an MCP server by name.
    pub fn mcp_server(&self, name: &str) -> Option<&McpServer> {
        self.mcp_servers.iter().find(|s| s.name == name)
    }

    /// True when nothing at all was discovered.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
            && self.commands.is_empty()
            && self.output_styles.is_empty()
            && self.mcp_servers.is_empty()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Discover `*.md` components in one category directory.
fn load_category(setup_root: &Path, category: ComponentCategory) -> SetupResult<Vec<Component>> {
    let dir = setup_root.join(category.dir_name());
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut components = Vec::new();
    for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let content = fs::read_to_string(path)?;
        let description = first_content_line(&content)
            .unwrap_or_else(|| format!("{} component", category.display_name()));

        components.push(Component {
            name: name.to_string(),
            category,
            description,
            token_estimate: category.token_estimate(),
            source_path: path.to_path_buf(),
            content,
        });
    }

    components.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(components)
}

/// Load all MCP server manifests under `<setup_root>/mcp-servers/*/config.json`.
///
/// A server whose manifest fails to read or deserialize is skipped with a
/// diagnostic; the remaining servers load normally.
fn load_mcp_servers(setup_root: &Path) -> SetupResult<Vec<McpServer>> {
    let dir = setup_root.join(MCP_SERVERS_DIR);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut servers = Vec::new();
    for entry in fs::read_dir(&dir)?.filter_map(|e| e.ok()) {
        let server_dir = entry.path();
        if !server_dir.is_dir() {
            continue;
        }
        let config_path = server_dir.join(MCP_CONFIG_FILE);
        if !config_path.exists() {
            continue;
        }

        let server_name = entry.file_name().to_string_lossy().into_owned();
        match load_server_config(&server_name, &config_path) {
            Ok(server) => servers.push(server),
            Err(e) => warn!("Skipping MCP server '{server_name}': {e}"),
        }
    }

    servers.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(servers)
}

/// Deserialize one server manifest; all-or-nothing per server.
fn load_server_config(server: &str, path: &Path) -> SetupResult<McpServer> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| SetupError::InvalidServerConfig {
        server: server.to_string(),
        reason: e.to_string(),
    })
}

/// First non-empty content line, stripped of markdown heading markers.
/// Frontmatter fences and horizontal rules are skipped.
fn first_content_line(content: &str) -> Option<String> {
    content
        .lines()
        .map(|l| l.trim().trim_start_matches('#').trim())
        .find(|l| !l.is_empty() && !l.chars().all(|c| c == '-' || c == '='))
        .map(|l| l.to_string())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
