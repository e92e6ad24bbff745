//! Charm-style CLI prompts using cliclack

use super::reporter::CliclackReporter;
use crate::config::Settings;
use crate::generator;
use crate::product::ProductConfig;
use crate::project::{DeployAdapter, GenerationRequest, ProjectKind, RoutingStrategy};
use crate::report::Reporter;
use crate::runtime::{version_label, Toolchain};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Ways the interactive flow ends early
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("cancelled by user")]
    Cancelled,
}

/// Map a prompt's interrupt (Esc / Ctrl-C) to [`FlowError::Cancelled`]
fn ask<T>(answer: io::Result<T>) -> Result<T> {
    answer.map_err(|e| {
        if e.kind() == io::ErrorKind::Interrupted {
            FlowError::Cancelled.into()
        } else {
            anyhow::Error::new(e).context("Prompt failed")
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextAction {
    StartServer,
    ShowInstructions,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, settings: Settings, cli_version: &str) -> Result<()> {
    let tools = Toolchain::default();
    let reporter = CliclackReporter;
    info!(product = config.name(), version = cli_version, framework = ?settings.framework, "starting");

    let result = run_flow(config, &settings, &tools, &reporter, cli_version).await;

    if let Err(e) = &result {
        if matches!(e.downcast_ref::<FlowError>(), Some(FlowError::Cancelled)) {
            cliclack::outro_cancel("System aborted.")?;
        }
    }

    result
}

async fn run_flow<C: ProductConfig>(
    config: &C,
    settings: &Settings,
    tools: &Toolchain,
    reporter: &dyn Reporter,
    cli_version: &str,
) -> Result<()> {
    // Step 1: Banner with the framework version that will be installed
    print_banner(config, settings, tools, cli_version).await;
    cliclack::intro(config.display_name())?;

    if settings.is_local() {
        reporter.warning(&format!("Using local {} dependency", settings.package))?;
    }

    // Step 2: Collect the request
    let (location, request) = collect_request(config, settings, reporter)?;

    // Step 3: Generate
    create_project(&request).await?;

    // Step 4: Version control
    tools
        .init_repository(&request.project_path, config.commit_message(), reporter)
        .await?;

    // Step 5: Dependencies
    reporter.info("Initializing environment (uv sync)...")?;
    let synced = tools
        .sync_environment(&request.project_path, reporter)
        .await?;

    // Step 6: Start the server or explain how to
    let action = ask(
        cliclack::select("What would you like to do next?")
            .item(NextAction::StartServer, "Start development server", "")
            .item(NextAction::ShowInstructions, "Show instructions and exit", "")
            .interact(),
    )?;

    if action == NextAction::StartServer {
        reporter.info("Starting development server...")?;
        if tools
            .start_dev_server(&request.project_path, config.dev_command(), reporter)
            .await?
        {
            return Ok(());
        }
    }

    print_next_steps(config, &location, synced)
}

async fn print_banner<C: ProductConfig>(
    config: &C,
    settings: &Settings,
    tools: &Toolchain,
    cli_version: &str,
) {
    let label = if settings.framework.needs_resolution() {
        let spinner = cliclack::spinner();
        spinner.start("Resolving version...");
        let label = version_label(&settings.framework, settings.package, &tools.version_query()).await;
        spinner.stop(format!("{} {}", config.display_name(), label));
        label
    } else {
        settings.framework.base_label(settings.package)
    };

    if !config.banner().is_empty() {
        println!("{}", config.banner().cyan().bold());
    }
    println!(
        "{}",
        format!("v{} • {} {}", cli_version, config.display_name(), label).dimmed()
    );
    println!();
}

/// Ask every question in order and build the generation request.
/// Returns the location exactly as typed alongside the request.
fn collect_request<C: ProductConfig>(
    config: &C,
    settings: &Settings,
    reporter: &dyn Reporter,
) -> Result<(String, GenerationRequest)> {
    let location: String = ask(
        cliclack::input("Where should we initialize the system?")
            .placeholder(config.default_directory())
            .default_input(config.default_directory())
            .interact(),
    )?;
    let project_path = resolve_destination(&location)?;
    warn_if_not_empty(&project_path, reporter)?;

    let mut kinds = cliclack::select("Select a starting template");
    for kind in ProjectKind::ALL {
        kinds = kinds.item(kind, kind.display_name(), kind.description());
    }
    let kind = ask(kinds.initial_value(ProjectKind::ALL[0]).interact())?;

    let mut routings = cliclack::select("Choose a routing architecture");
    for routing in RoutingStrategy::ALL {
        routings = routings.item(routing, routing.display_name(), "");
    }
    let routing = ask(routings.initial_value(RoutingStrategy::PathBased).interact())?;

    let use_src = ask(
        cliclack::confirm("Use 'src/' directory layout? (recommended for larger projects)")
            .initial_value(true)
            .interact(),
    )?;

    let mut adapter_prompt = cliclack::multiselect("Select deployment adapters to configure");
    for adapter in DeployAdapter::ALL {
        adapter_prompt = adapter_prompt.item(adapter, adapter.display_name(), "");
    }
    let adapters: Vec<DeployAdapter> = ask(adapter_prompt.required(false).interact())?;

    let request = GenerationRequest::new(
        project_path,
        kind,
        routing,
        use_src,
        &adapters,
        settings.requirement(),
    );

    Ok((location, request))
}

/// Expand `~`, make the destination absolute and fold away `.` and `..`
fn resolve_destination(input: &str) -> Result<PathBuf> {
    let input = input.trim();
    let expanded = shellexpand::tilde(input);
    let path = PathBuf::from(expanded.as_ref());

    if path.is_absolute() {
        return Ok(normalize(&path));
    }

    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    Ok(normalize(&current_dir.join(path)))
}

/// Lexical normalization; `..` at the root stays at the root
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn warn_if_not_empty(path: &Path, reporter: &dyn Reporter) -> Result<()> {
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(path) {
            let count = entries.count();
            if count > 0 {
                reporter.warning(&format!(
                    "Directory has {} existing items; generated files will overwrite matches",
                    count
                ))?;
            }
        }
    }
    Ok(())
}

async fn create_project(request: &GenerationRequest) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Synthesizing project structure...");

    match generator::generate(request).await {
        Ok(generated) => {
            spinner.stop(format!(
                "Project structure created ({} files in {})",
                generated.files.len(),
                request.project_path.display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.error("Failed to create project");
            Err(e)
        }
    }
}

fn print_next_steps<C: ProductConfig>(config: &C, location: &str, synced: bool) -> Result<()> {
    let steps = config.next_steps(location, synced);

    let mut body = String::from("Run the following commands to enter the environment:\n\n");
    for step in &steps {
        body.push_str(&format!("    {}\n", step));
    }
    body.push_str(&format!(
        "\nTip: Install the {} extension (id: {}) in VS Code for syntax highlighting and snippets.",
        config.display_name(),
        config.editor_extension(),
    ));
    if let Some(docs) = config.docs_url() {
        body.push_str(&format!("\nDocs: {}", docs));
    }

    cliclack::note("Initialization Complete", body)?;
    cliclack::outro("System online. Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::memory::{Level, MemoryReporter};

    #[test]
    fn test_interrupt_maps_to_cancelled() {
        let err = ask::<()>(Err(io::Error::new(io::ErrorKind::Interrupted, "esc"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FlowError>(),
            Some(FlowError::Cancelled)
        ));
    }

    #[test]
    fn test_other_prompt_errors_propagate() {
        let err = ask::<()>(Err(io::Error::new(io::ErrorKind::BrokenPipe, "tty"))).unwrap_err();
        assert!(err.downcast_ref::<FlowError>().is_none());
    }

    #[test]
    fn test_resolve_destination() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_destination("./my-app").unwrap(), cwd.join("my-app"));
        assert_eq!(
            resolve_destination("/tmp/site").unwrap(),
            PathBuf::from("/tmp/site")
        );
    }

    #[test]
    fn test_project_name_from_typed_location() {
        let path = resolve_destination("./my-app").unwrap();
        let req = GenerationRequest::new(
            path,
            ProjectKind::Skeleton,
            RoutingStrategy::PathBased,
            true,
            &[],
            "pywire",
        );
        assert_eq!(req.project_name, "my-app");
    }

    #[test]
    fn test_parent_segments_are_folded() {
        let cwd = std::env::current_dir().unwrap();

        let up = resolve_destination("..").unwrap();
        assert_eq!(up, cwd.parent().unwrap());
        let req = GenerationRequest::new(
            up,
            ProjectKind::Skeleton,
            RoutingStrategy::PathBased,
            true,
            &[],
            "pywire",
        );
        assert_eq!(
            req.project_name,
            cwd.parent().unwrap().file_name().unwrap().to_string_lossy()
        );

        assert_eq!(resolve_destination("./x/../y").unwrap(), cwd.join("y"));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/a/./b/../../..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/srv/sites/./blog/")), PathBuf::from("/srv/sites/blog"));
    }

    #[test]
    fn test_non_empty_destination_warns_through_reporter() {
        let tmp = tempfile::tempdir().unwrap();
        let reporter = MemoryReporter::default();

        warn_if_not_empty(tmp.path(), &reporter).unwrap();
        assert!(reporter.entries().is_empty());

        std::fs::write(tmp.path().join("notes.txt"), "keep").unwrap();
        warn_if_not_empty(tmp.path(), &reporter).unwrap();
        assert!(reporter.has(Level::Warning, "1 existing items"));
    }
}
