//! Interactive selection session.
//!
//! Uses cliclack with a custom theme (cyan accents, spring-green submits).
//! The session owns the single mutable [`SelectionState`]: every checklist
//! submit is applied through `toggle` calls and immediately followed by a
//! refreshed token summary, so the cost display always reflects the current
//! selection.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

use cliclack::{Theme, ThemeState, intro, multiselect, note, outro, outro_cancel, select, set_theme};
use colored::Colorize;
use console::{Style, Term};

use crate::catalog::{Catalog, Component, ComponentCategory, McpServer};
use crate::error::{SetupError, SetupResult};
use crate::format::{MAX_DESC_LEN, MAX_MCP_DESC_LEN, token_summary, truncate_desc};
use crate::selection::{SelectionKind, SelectionState};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

static CTRLC_HANDLER_SET: AtomicBool = AtomicBool::new(false);

/// Selectable kinds in menu order.
const SELECTABLE_KINDS: [SelectionKind; 4] = [
    SelectionKind::Agents,
    SelectionKind::Commands,
    SelectionKind::OutputStyles,
    SelectionKind::McpServers,
];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Custom theme for the selection session.
pub struct SetupTheme;

/// What the user chose to do when leaving the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOutcome {
    /// Write the artifact from the current selection.
    Generate,
    /// Leave without writing.
    Quit,
}

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Edit(SelectionKind),
    Generate,
    Sync,
    Upload,
    Download,
    Quit,
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Theme for SetupTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().color256(81), // Sky cyan in 256 color mode
            ThemeState::Error(_) => Style::new().red(),
            _ => Style::new().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().color256(81),
            ThemeState::Submit => Style::new().color256(48), // Spring green on submit
            ThemeState::Error(_) => Style::new().red(),
            _ => Style::new().dim(),
        }
    }

    fn input_style(&self, _state: &ThemeState) -> Style {
        Style::new()
    }

    fn placeholder_style(&self, _state: &ThemeState) -> Style {
        Style::new().dim()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Initialize the theme for cliclack prompts and set up Ctrl+C handler.
pub fn init_theme() {
    set_theme(SetupTheme);

    // Set up Ctrl+C handler to restore terminal state (only once)
    if !CTRLC_HANDLER_SET.swap(true, Ordering::SeqCst) {
        let _ = ctrlc::set_handler(|| {
            // Restore cursor and terminal state
            let term = Term::stderr();
            let _ = term.show_cursor();
            std::process::exit(130); // Standard exit code for Ctrl+C
        });
    }
}

/// Run the interactive selection session.
///
/// Returns what to do next; the caller performs the actual artifact write so
/// filesystem effects stay out of the prompt layer.
pub fn run_selector(
    state: &mut SelectionState,
    catalog: &Catalog,
) -> SetupResult<SelectorOutcome> {
    init_theme();

    let project_name = state
        .project_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| state.project_path.display().to_string());
    let status = if state.is_preexisting {
        "existing configuration"
    } else {
        "new configuration"
    };

    map_cancelled(intro("Claude Setup Manager".bold().to_string()))?;
    map_cancelled(note("Project", format!("{project_name} ({status})")))?;

    loop {
        println!("  {}", token_summary(state.total_tokens(catalog)));

        let mut menu = select("What would you like to do?");
        for kind in SELECTABLE_KINDS {
            menu = menu.item(
                MenuChoice::Edit(kind),
                kind_label(kind),
                format!("{} selected", state.selected_count(kind)),
            );
        }
        let choice: MenuChoice = map_cancelled(
            menu.item(
                MenuChoice::Generate,
                "Generate CLAUDE.md",
                "write the configuration",
            )
            .item(MenuChoice::Sync, "Sync with GitHub", "not yet implemented")
            .item(
                MenuChoice::Upload,
                "Upload to GitHub",
                "not yet implemented",
            )
            .item(
                MenuChoice::Download,
                "Download from GitHub",
                "not yet implemented",
            )
            .item(MenuChoice::Quit, "Quit", "discard changes")
            .interact(),
        )?;

        match choice {
            MenuChoice::Edit(kind) => edit_selection(kind, state, catalog)?,
            MenuChoice::Generate => {
                map_cancelled(outro("Generating CLAUDE.md..."))?;
                return Ok(SelectorOutcome::Generate);
            }
            MenuChoice::Sync => notify_unimplemented("Syncing with GitHub"),
            MenuChoice::Upload => notify_unimplemented("Uploading to GitHub"),
            MenuChoice::Download => notify_unimplemented("Downloading from GitHub"),
            MenuChoice::Quit => {
                map_cancelled(outro_cancel("No changes written."))?;
                return Ok(SelectorOutcome::Quit);
            }
        }
    }
}

/// Checklist over one catalog. The submitted set is applied through `toggle`
/// per known name; names outside this catalog (stale imports) are untouched.
fn edit_selection(
    kind: SelectionKind,
    state: &mut SelectionState,
    catalog: &Catalog,
) -> SetupResult<()> {
    let options = selection_rows(kind, catalog);
    if options.is_empty() {
        println!(
            "  {} Nothing available under {}",
            "·".dimmed(),
            kind_label(kind)
        );
        return Ok(());
    }

    let initial: Vec<String> = state
        .selected(kind)
        .iter()
        .filter(|name| options.iter().any(|(n, _, _)| n == *name))
        .cloned()
        .collect();

    let picked: Vec<String> = map_cancelled(
        multiselect(format!("Select {}", kind_label(kind)))
            .items(
                &options
                    .iter()
                    .map(|(value, label, hint)| (value.clone(), label.as_str(), hint.as_str()))
                    .collect::<Vec<_>>(),
            )
            .initial_values(initial)
            .required(false)
            .interact(),
    )?;

    let chosen: BTreeSet<String> = picked.into_iter().collect();
    for (name, _, _) in &options {
        state.toggle(kind, name, chosen.contains(name));
    }

    Ok(())
}

/// (value, label, hint) rows for one selectable kind.
fn selection_rows(kind: SelectionKind, catalog: &Catalog) -> Vec<(String, String, String)> {
    match kind {
        SelectionKind::Agents => component_rows(catalog.components(ComponentCategory::Agents)),
        SelectionKind::Commands => component_rows(catalog.components(ComponentCategory::Commands)),
        SelectionKind::OutputStyles => {
            component_rows(catalog.components(ComponentCategory::OutputStyles))
        }
        SelectionKind::McpServers => catalog.mcp_servers.iter().map(mcp_row).collect(),
    }
}

fn component_rows(components: &[Component]) -> Vec<(String, String, String)> {
    components
        .iter()
        .map(|c| {
            (
                c.name.clone(),
                c.name.clone(),
                truncate_desc(&c.description, MAX_DESC_LEN),
            )
        })
        .collect()
}

fn mcp_row(server: &McpServer) -> (String, String, String) {
    let tokens_kb = server.token_usage as f64 / 1000.0;
    (
        server.name.clone(),
        format!("{} ({tokens_kb:.1}k tokens)", server.name),
        truncate_desc(&server.description, MAX_MCP_DESC_LEN),
    )
}

fn kind_label(kind: SelectionKind) -> &'static str {
    match kind {
        SelectionKind::Agents => "Agents",
        SelectionKind::Commands => "Commands",
        SelectionKind::OutputStyles => "Output Styles",
        SelectionKind::McpServers => "MCP Servers",
    }
}

fn notify_unimplemented(action: &str) {
    println!();
    println!(
        "  {} {}... {}",
        "·".bright_yellow(),
        action,
        "not yet implemented".dimmed()
    );
    println!();
}

/// Check if an error indicates the user cancelled (ESC or Ctrl+C).
fn is_cancelled(e: &std::io::Error) -> bool {
    e.kind() == std::io::ErrorKind::Interrupted
}

/// Convert IO interrupted errors to Cancelled for clean exit on ESC.
fn map_cancelled<T>(result: Result<T, std::io::Error>) -> SetupResult<T> {
    result.map_err(|e| {
        if is_cancelled(&e) {
            SetupError::Cancelled
        } else {
            SetupError::Io(e)
        }
    })
}
