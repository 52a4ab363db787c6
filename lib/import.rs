//! Best-effort import of selections from an existing artifact.
//!
//! The importer scans the raw text of an existing `CLAUDE.md` for known
//! catalog names and pre-selects every one it finds. This is substring
//! containment, not structured parsing: false positives and negatives are
//! accepted, since the result only seeds the initial UI state. The heuristic
//! sits behind [`ImportStrategy`] so a structured parser can replace it
//! without touching the selection state or the generator.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::catalog::{Catalog, ComponentCategory};
use crate::constants::{ARTIFACT_FILE, CLAUDE_DIR};
use crate::error::SetupResult;
use crate::selection::{SelectionKind, SelectionState};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Strategy for seeding a selection from existing artifact text.
pub trait ImportStrategy {
    /// Pre-populate `state` from the raw artifact `content`.
    fn seed(&self, content: &str, catalog: &Catalog, state: &mut SelectionState);
}

/// Substring-containment importer over known catalog names.
#[derive(Debug, Default)]
pub struct SubstringImporter;

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl ImportStrategy for SubstringImporter {
    fn seed(&self, content: &str, catalog: &Catalog, state: &mut SelectionState) {
        for category in ComponentCategory::ALL {
            for component in catalog.components(category) {
                if content.contains(&component.name) {
                    state.toggle(category.into(), &component.name, true);
                }
            }
        }
        for server in &catalog.mcp_servers {
            if content.contains(&server.name) {
                state.toggle(SelectionKind::McpServers, &server.name, true);
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Build the selection state for a project, seeding it from an existing
/// artifact when one is present at `<project>/.claude/CLAUDE.md`.
pub fn detect_project(
    project_path: &Path,
    catalog: &Catalog,
    importer: &dyn ImportStrategy,
) -> SetupResult<SelectionState> {
    let mut state = SelectionState::new(project_path.to_path_buf());

    let artifact_path = project_path.join(CLAUDE_DIR).join(ARTIFACT_FILE);
    if artifact_path.exists() {
        let content = fs::read_to_string(&artifact_path)?;
        importer.seed(&content, catalog, &mut state);
        debug!(
            "Seeded selection from existing {}: {} agents, {} commands, {} styles, {} servers",
            artifact_path.display(),
            state.selected_agents.len(),
            state.selected_commands.len(),
            state.selected_output_styles.len(),
            state.selected_mcp_servers.len(),
        );
        state.existing_artifact = Some(artifact_path);
        state.is_preexisting = true;
    }

    Ok(state)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Component, McpServer};
    use std::path::PathBuf;

    fn component(name: &str, category: ComponentCategory) -> Component {
        Component {
            name: name.to_string(),
            category,
            description: format!("{name} description"),
            token_estimate: category.token_estimate(),
            source_path: PathBuf::from(format!("{}/{name}.md", category.dir_name())),
            content: String::new(),
        }
    }

    fn test_catalog() -> Catalog {
        Catalog {
            agents: vec![
                component("code-reviewer", ComponentCategory::Agents),
                component("test-runner", ComponentCategory::Agents),
            ],
            commands: vec![component("deploy", ComponentCategory::Commands)],
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
        }
    }

    #[test]
    fn test_seed_selects_names_found_in_text() {
        let catalog = test_catalog();
        let mut state = SelectionState::new(PathBuf::from("/tmp/project"));
        let content = "## Active Components\n### Agents\n- code-reviewer\n\n- github: vcs\n";

        SubstringImporter.seed(content, &catalog, &mut state);

        assert!(state.selected_agents.contains("code-reviewer"));
        assert!(!state.selected_agents.contains("test-runner"));
        assert!(state.selected_commands.is_empty());
        assert!(state.selected_mcp_servers.contains("github"));
    }

    #[test]
    fn test_detect_project_without_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let state = detect_project(tmp.path(), &test_catalog(), &SubstringImporter).unwrap();
        assert!(!state.is_preexisting);
        assert!(state.existing_artifact.is_none());
        assert!(state.selected_agents.is_empty());
    }

    #[test]
    fn test_detect_project_seeds_from_existing_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let claude_dir = tmp.path().join(CLAUDE_DIR);
        fs::create_dir_all(&claude_dir).unwrap();
        fs::write(claude_dir.join(ARTIFACT_FILE), "- test-runner\n- deploy\n").unwrap();

        let state = detect_project(tmp.path(), &test_catalog(), &SubstringImporter).unwrap();
        assert!(state.is_preexisting);
        assert!(state.selected_agents.contains("test-runner"));
        assert!(state.selected_commands.contains("deploy"));
        assert!(state.selected_mcp_servers.is_empty());
    }
}
