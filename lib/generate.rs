//! Artifact generation and backup rotation.
//!
//! Rendering is deterministic: selection sets iterate sorted by name, so two
//! renders of the same state are byte-identical. Before an existing artifact
//! is overwritten it is copied unmodified into the history directory under a
//! timestamped name; the copy must succeed before the overwrite happens, and
//! the history is pruned to the retention limit afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::catalog::{Catalog, ComponentCategory};
use crate::constants::{ARTIFACT_FILE, BACKUP_RETENTION, CLAUDE_DIR, HISTORY_DIR};
use crate::error::{SetupError, SetupResult};
use crate::format::format_thousands;
use crate::selection::SelectionState;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result of writing the artifact.
#[derive(Debug)]
pub struct WriteOutcome {
    pub artifact_path: PathBuf,
    /// Path of the backup taken of the prior version, if one existed.
    pub backup_path: Option<PathBuf>,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Render the artifact text from the current selection and catalogs.
pub fn render(state: &SelectionState, catalog: &Catalog) -> String {
    let total = state.total_tokens(catalog);
    let percentage = state.token_percentage(catalog);

    let mut lines: Vec<String> = vec![
        "# Project Configuration".into(),
        "## Token Optimization".into(),
        format!(
            "Estimated usage: {} tokens (~{percentage:.1}%)",
            format_thousands(total)
        ),
        String::new(),
        "## MCP Servers".into(),
        "Load only when needed:".into(),
    ];

    if state.selected_mcp_servers.is_empty() {
        lines.push("- None selected (0% MCP tokens)".into());
    } else {
        for name in &state.selected_mcp_servers {
            // A stale name has no catalog entry; its cost is already zero.
            let Some(server) = catalog.mcp_server(name) else {
                continue;
            };
            lines.push(format!("- {}: {}", server.name, server.description));
            if !server.when_to_load.is_empty() {
                let hints: Vec<&str> = server
                    .when_to_load
                    .iter()
                    .take(3)
                    .map(String::as_str)
                    .collect();
                lines.push(format!("  Load when: {}", hints.join(", ")));
            }
        }
    }

    lines.push(String::new());
    lines.push("## Active Components".into());

    for category in ComponentCategory::ALL {
        let selected = state.selected(category.into());
        if selected.is_empty() {
            continue;
        }
        lines.push(format!("### {}", category.section_heading()));
        for name in selected {
            lines.push(format!("- {name}"));
        }
    }

    lines.extend([
        String::new(),
        "## Instructions".into(),
        "This configuration keeps initial token usage minimal.".into(),
        "Load MCP servers on-demand during your session by saying:".into(),
        "- 'load github mcp' when ready to commit".into(),
        "- 'load playwright' for testing".into(),
        "- 'load neo4j' for database work".into(),
    ]);

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write the artifact for the current selection, backing up any existing
/// version first. A backup failure aborts before the overwrite, leaving the
/// prior artifact intact.
pub fn write_artifact(state: &SelectionState, catalog: &Catalog) -> SetupResult<WriteOutcome> {
    let claude_dir = state.project_path.join(CLAUDE_DIR);
    fs::create_dir_all(&claude_dir)?;

    let artifact_path = claude_dir.join(ARTIFACT_FILE);
    let backup_path = if artifact_path.exists() {
        let history_dir = claude_dir.join(HISTORY_DIR);
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        Some(create_backup(&artifact_path, &history_dir, &timestamp)?)
    } else {
        None
    };

    fs::write(&artifact_path, render(state, catalog))?;

    Ok(WriteOutcome {
        artifact_path,
        backup_path,
    })
}

/// Copy the existing artifact into the history directory under a timestamped
/// name, then prune the history to the retention limit.
fn create_backup(
    artifact_path: &Path,
    history_dir: &Path,
    timestamp: &str,
) -> SetupResult<PathBuf> {
    let backup_failed = |source: std::io::Error| SetupError::BackupFailed {
        path: artifact_path.to_path_buf(),
        source,
    };

    fs::create_dir_all(history_dir).map_err(backup_failed)?;

    let backup_path = history_dir.join(format!("CLAUDE_{timestamp}.md"));
    fs::copy(artifact_path, &backup_path).map_err(backup_failed)?;

    prune_old_backups(history_dir, BACKUP_RETENTION)?;

    Ok(backup_path)
}

/// Remove old backups, keeping only the most recent N.
/// Timestamped names sort lexicographically, newest last.
fn prune_old_backups(history_dir: &Path, keep: usize) -> SetupResult<()> {
    let mut backups: Vec<PathBuf> = fs::read_dir(history_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_backup_file(p))
        .collect();

    backups.sort();
    let excess = backups.len().saturating_sub(keep);
    for old in backups.into_iter().take(excess) {
        let _ = fs::remove_file(old);
    }

    Ok(())
}

fn is_backup_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("CLAUDE_") && n.ends_with(".md"))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::McpServer;
    use crate::selection::SelectionKind;

    fn server(name: &str, token_usage: u64, when_to_load: &[&str]) -> McpServer {
        McpServer {
            name: name.to_string(),
            description: format!("{name} integration"),
            token_usage,
            tools_count: 10,
            category: "test".to_string(),
            use_cases: vec![],
            when_to_load: when_to_load.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_single_agent() {
        let catalog = Catalog::default();
        let mut state = SelectionState::new(PathBuf::from("/tmp/project"));
        state.toggle(SelectionKind::Agents, "code-reviewer", true);

        let text = render(&state, &catalog);
        assert!(text.contains("Estimated usage: 200 tokens (~0.1%)"));
        assert!(text.contains("- None selected (0% MCP tokens)"));
        assert!(text.contains("### Agents\n- code-reviewer"));
        assert!(!text.contains("### Commands"));
        assert!(!text.contains("### Output Style"));
    }

    #[test]
    fn test_render_mcp_and_percentage() {
        let catalog = Catalog {
            mcp_servers: vec![server(
                "github",
                5000,
                &["ready to commit", "opening PRs", "reviewing issues", "never shown"],
            )],
            ..Catalog::default()
        };
        let mut state = SelectionState::new(PathBuf::from("/tmp/project"));
        state.toggle(SelectionKind::McpServers, "github", true);
        state.toggle(SelectionKind::Agents, "code-reviewer", true);
        state.toggle(SelectionKind::Agents, "test-runner", true);
        state.toggle(SelectionKind::Commands, "deploy", true);

        let text = render(&state, &catalog);
        assert!(text.contains("Estimated usage: 5,550 tokens (~2.8%)"));
        assert!(text.contains("- github: github integration"));
        assert!(text.contains("Load when: ready to commit, opening PRs, reviewing issues"));
        assert!(!text.contains("never shown"));
        assert!(!text.contains("None selected"));
    }

    #[test]
    fn test_render_is_deterministic_and_sorted() {
        let catalog = Catalog {
            mcp_servers: vec![server("neo4j", 3000, &[]), server("github", 5000, &[])],
            ..Catalog::default()
        };
        let mut state = SelectionState::new(PathBuf::from("/tmp/project"));
        state.toggle(SelectionKind::McpServers, "neo4j", true);
        state.toggle(SelectionKind::McpServers, "github", true);
        state.toggle(SelectionKind::Agents, "zeta", true);
        state.toggle(SelectionKind::Agents, "alpha", true);

        let first = render(&state, &catalog);
        let second = render(&state, &catalog);
        assert_eq!(first, second);

        let github = first.find("- github:").unwrap();
        let neo4j = first.find("- neo4j:").unwrap();
        assert!(github < neo4j);

        let alpha = first.find("- alpha").unwrap();
        let zeta = first.find("- zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn test_render_skips_stale_mcp_names() {
        let catalog = Catalog::default();
        let mut state = SelectionState::new(PathBuf::from("/tmp/project"));
        state.toggle(SelectionKind::McpServers, "retired", true);

        let text = render(&state, &catalog);
        assert!(!text.contains("retired"));
        // Non-empty selection of only stale names still suppresses the
        // "None selected" line.
        assert!(!text.contains("None selected"));
    }

    #[test]
    fn test_write_artifact_creates_file_without_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let state = SelectionState::new(tmp.path().to_path_buf());
        let catalog = Catalog::default();

        let outcome = write_artifact(&state, &catalog).unwrap();
        assert!(outcome.artifact_path.exists());
        assert!(outcome.backup_path.is_none());
        assert!(!tmp.path().join(CLAUDE_DIR).join(HISTORY_DIR).exists());
    }

    #[test]
    fn test_write_artifact_backs_up_prior_version() {
        let tmp = tempfile::tempdir().unwrap();
        let claude_dir = tmp.path().join(CLAUDE_DIR);
        fs::create_dir_all(&claude_dir).unwrap();
        fs::write(claude_dir.join(ARTIFACT_FILE), "prior contents\n").unwrap();

        let mut state = SelectionState::new(tmp.path().to_path_buf());
        state.toggle(SelectionKind::Agents, "code-reviewer", true);

        let outcome = write_artifact(&state, &Catalog::default()).unwrap();
        let backup = outcome.backup_path.unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "prior contents\n");
        assert!(
            fs::read_to_string(&outcome.artifact_path)
                .unwrap()
                .contains("code-reviewer")
        );
    }

    #[test]
    fn test_backup_failure_aborts_before_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let claude_dir = tmp.path().join(CLAUDE_DIR);
        fs::create_dir_all(&claude_dir).unwrap();
        fs::write(claude_dir.join(ARTIFACT_FILE), "prior contents\n").unwrap();
        // Occupy the history path with a file so the backup copy cannot land.
        fs::write(claude_dir.join(HISTORY_DIR), "in the way").unwrap();

        let state = SelectionState::new(tmp.path().to_path_buf());
        let result = write_artifact(&state, &Catalog::default());
        assert!(matches!(result, Err(SetupError::BackupFailed { .. })));
        assert_eq!(
            fs::read_to_string(claude_dir.join(ARTIFACT_FILE)).unwrap(),
            "prior contents\n"
        );
    }

    #[test]
    fn test_fifteen_backups_retain_ten_most_recent() {
        let tmp = tempfile::tempdir().unwrap();
        let claude_dir = tmp.path().join(CLAUDE_DIR);
        fs::create_dir_all(&claude_dir).unwrap();
        let artifact = claude_dir.join(ARTIFACT_FILE);
        fs::write(&artifact, "contents\n").unwrap();

        let history_dir = claude_dir.join(HISTORY_DIR);
        for i in 0..15 {
            let timestamp = format!("20250807_1015{i:02}");
            create_backup(&artifact, &history_dir, &timestamp).unwrap();
        }

        let mut names: Vec<String> = fs::read_dir(&history_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names.len(), BACKUP_RETENTION);
        let expected: Vec<String> = (5..15)
            .map(|i| format!("CLAUDE_20250807_1015{i:02}.md"))
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_prune_ignores_foreign_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("notes.md"), "keep me").unwrap();
        fs::write(tmp.path().join("CLAUDE_20250101_000000.md"), "old").unwrap();

        prune_old_backups(tmp.path(), 0).unwrap();
        assert!(tmp.path().join("notes.md").exists());
        assert!(!tmp.path().join("CLAUDE_20250101_000000.md").exists());
    }
}
