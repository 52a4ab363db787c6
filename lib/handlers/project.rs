//! Project configuration handlers.

use std::io::IsTerminal;
use std::path::PathBuf;

use colored::Colorize;

use crate::catalog::{Catalog, ComponentCategory};
use crate::constants::{CLAUDE_SETUP_HOME_ENV, DEFAULT_SETUP_PATH};
use crate::error::{SetupError, SetupResult};
use crate::format::format_thousands;
use crate::generate::{WriteOutcome, write_artifact};
use crate::import::{SubstringImporter, detect_project};
use crate::output::CatalogOutput;
use crate::prompt::{SelectorOutcome, run_selector};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Run the interactive selection session and write the artifact on demand.
pub fn interactive(project: Option<String>) -> SetupResult<()> {
    let project_path = resolve_project(project)?;
    let setup_root = resolve_setup_root()?;
    let catalog = Catalog::load(&setup_root)?;

    if !std::io::stdin().is_terminal() {
        return Err(SetupError::Generic(
            "Interactive selection needs a terminal. Use `claude-setup generate --yes` instead."
                .into(),
        ));
    }

    let mut state = detect_project(&project_path, &catalog, &SubstringImporter)?;

    match run_selector(&mut state, &catalog)? {
        SelectorOutcome::Generate => {
            let outcome = write_artifact(&state, &catalog)?;
            print_write_outcome(&outcome);
            Ok(())
        }
        SelectorOutcome::Quit => Ok(()),
    }
}

/// Generate the artifact; interactive unless `--yes`.
///
/// With `--yes` the selection written is exactly what the importer recovers
/// from an existing CLAUDE.md (empty for a new project).
pub fn generate(project: Option<String>, yes: bool) -> SetupResult<()> {
    if !yes {
        return interactive(project);
    }

    let project_path = resolve_project(project)?;
    let setup_root = resolve_setup_root()?;
    let catalog = Catalog::load(&setup_root)?;
    let state = detect_project(&project_path, &catalog, &SubstringImporter)?;

    let outcome = write_artifact(&state, &catalog)?;
    print_write_outcome(&outcome);
    Ok(())
}

/// List available components and MCP servers.
pub fn list(json: bool) -> SetupResult<()> {
    let setup_root = resolve_setup_root()?;
    let catalog = Catalog::load(&setup_root)?;

    if json {
        let output = CatalogOutput::from(&catalog);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    for category in ComponentCategory::ALL {
        let components = catalog.components(category);
        println!(
            "  {} {}",
            category.display_name().bold(),
            format!("({} tokens each)", category.token_estimate()).dimmed()
        );
        if components.is_empty() {
            println!("    {}", "none".dimmed());
        }
        for component in components {
            println!(
                "    {} {:<24} {}",
                "·".dimmed(),
                component.name,
                component.description.dimmed()
            );
        }
        println!();
    }

    println!("  {}", "MCP Servers".bold());
    if catalog.mcp_servers.is_empty() {
        println!("    {}", "none".dimmed());
    }
    for server in &catalog.mcp_servers {
        println!(
            "    {} {:<24} {}",
            "·".dimmed(),
            format!(
                "{} ({} tokens)",
                server.name,
                format_thousands(server.token_usage)
            ),
            server.description.dimmed()
        );
    }
    println!();

    Ok(())
}

/// Resolve and validate the project directory. A missing path is rejected
/// before any filesystem mutation.
fn resolve_project(project: Option<String>) -> SetupResult<PathBuf> {
    match project {
        Some(p) => {
            let path = PathBuf::from(&p);
            let path = if path.is_absolute() {
                path
            } else {
                std::env::current_dir()?.join(path)
            };
            if !path.is_dir() {
                return Err(SetupError::ProjectNotFound(path));
            }
            Ok(path)
        }
        None => Ok(std::env::current_dir()?),
    }
}

/// Resolve the setup root, honoring the env override. A missing root is a
/// hard stop before any catalogs load.
pub fn resolve_setup_root() -> SetupResult<PathBuf> {
    let root = std::env::var(CLAUDE_SETUP_HOME_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| DEFAULT_SETUP_PATH.clone());

    if !root.is_dir() {
        return Err(SetupError::SetupRootNotFound(root));
    }
    Ok(root)
}

fn print_write_outcome(outcome: &WriteOutcome) {
    println!();
    println!(
        "  {} Generated {}",
        "✓".bright_green(),
        outcome.artifact_path.display()
    );
    if let Some(backup) = &outcome.backup_path {
        println!(
            "  {} Backed up prior version to {}",
            "·".dimmed(),
            backup.display()
        );
    }
    println!();
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_project_rejects_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("no-such-project");
        let result = resolve_project(Some(missing.display().to_string()));
        assert!(matches!(result, Err(SetupError::ProjectNotFound(p)) if p == missing));
    }

    #[test]
    fn test_resolve_project_accepts_existing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let resolved = resolve_project(Some(tmp.path().display().to_string())).unwrap();
        assert_eq!(resolved, tmp.path());
    }
}
