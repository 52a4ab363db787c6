//! Per-project selection state.
//!
//! One [`SelectionState`] exists per run, owned mutably by the interactive
//! session and mutated exclusively through [`SelectionState::toggle`]. The
//! token total is recomputed on demand from the current sets, never cached.
//! Sets are `BTreeSet`s so every iteration over a selection is sorted and
//! deterministic.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::catalog::{Catalog, ComponentCategory};
use crate::constants::CONTEXT_WINDOW_TOKENS;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The four selectable kinds: the three component categories plus MCP servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Agents,
    Commands,
    OutputStyles,
    McpServers,
}

/// Mutable per-project selection record.
#[derive(Debug, Clone)]
pub struct SelectionState {
    pub project_path: PathBuf,
    /// The existing artifact the selection was seeded from, if any.
    pub existing_artifact: Option<PathBuf>,
    pub is_preexisting: bool,
    pub selected_agents: BTreeSet<String>,
    pub selected_commands: BTreeSet<String>,
    pub selected_output_styles: BTreeSet<String>,
    pub selected_mcp_servers: BTreeSet<String>,
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<ComponentCategory> for SelectionKind {
    fn from(category: ComponentCategory) -> Self {
        match category {
            ComponentCategory::Agents => Self::Agents,
            ComponentCategory::Commands => Self::Commands,
            ComponentCategory::OutputStyles => Self::OutputStyles,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl SelectionState {
    /// Empty selection for a project.
    pub fn new(project_path: PathBuf) -> Self {
        Self {
            project_path,
            existing_artifact: None,
            is_preexisting: false,
            selected_agents: BTreeSet::new(),
            selected_commands: BTreeSet::new(),
            selected_output_styles: BTreeSet::new(),
            selected_mcp_servers: BTreeSet::new(),
        }
    }

    /// The selection set for one kind.
    pub fn selected(&self, kind: SelectionKind) -> &BTreeSet<String> {
        match kind {
            SelectionKind::Agents => &self.selected_agents,
            SelectionKind::Commands => &self.selected_commands,
            SelectionKind::OutputStyles => &self.selected_output_styles,
            SelectionKind::McpServers => &self.selected_mcp_servers,
        }
    }

    fn selected_mut(&mut self, kind: SelectionKind) -> &mut BTreeSet<String> {
        match kind {
            SelectionKind::Agents => &mut self.selected_agents,
            SelectionKind::Commands => &mut self.selected_commands,
            SelectionKind::OutputStyles => &mut self.selected_output_styles,
            SelectionKind::McpServers => &mut self.selected_mcp_servers,
        }
    }

    /// Add or remove one name from a selection set. Idempotent.
    pub fn toggle(&mut self, kind: SelectionKind, name: &str, included: bool) {
        let set = self.selected_mut(kind);
        if included {
            set.insert(name.to_string());
        } else {
            set.remove(name);
        }
    }

    /// Number of selected items of one kind.
    pub fn selected_count(&self, kind: SelectionKind) -> usize {
        self.selected(kind).len()
    }

    /// Estimated token cost of the current selection.
    ///
    /// MCP servers contribute their declared `token_usage` (an unknown name
    /// contributes 0 rather than failing); components contribute a flat
    /// per-category estimate per selected name, known or not.
    pub fn total_tokens(&self, catalog: &Catalog) -> u64 {
        let mcp: u64 = self
            .selected_mcp_servers
            .iter()
            .filter_map(|name| catalog.mcp_server(name))
            .map(|server| server.token_usage)
            .sum();

        mcp + self.selected_agents.len() as u64 * ComponentCategory::Agents.token_estimate()
            + self.selected_commands.len() as u64 * ComponentCategory::Commands.token_estimate()
            + self.selected_output_styles.len() as u64
                * ComponentCategory::OutputStyles.token_estimate()
    }

    /// Token total as a percentage of the context window.
    pub fn token_percentage(&self, catalog: &Catalog) -> f64 {
        self.total_tokens(catalog) as f64 * 100.0 / CONTEXT_WINDOW_TOKENS as f64
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
