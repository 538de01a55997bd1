//! tjs-ctags CLI binary entry point.
//! Resolves settings, then drives the provider with a manual or save trigger.

use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tjs_ctags::cli::{Cli, Commands};
use tjs_ctags::error::Diagnostic;
use tjs_ctags::models::Trigger;
use tjs_ctags::provider::{language_id_for, CtagsProvider};
use tjs_ctags::report::{Collector, ConsoleReporter, Reporter};
use tjs_ctags::runner::{self, Plan, ShellLauncher};
use tjs_ctags::{config, loader, logging, output};
use tokio::runtime::Handle;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            0
        }
        Commands::Update {
            workspace_root,
            output,
        } => run_event(workspace_root.as_deref(), output.as_deref(), None).await,
        Commands::Save {
            file,
            language_id,
            workspace_root,
            output,
        } => {
            let lang = language_id.unwrap_or_else(|| language_id_for(Path::new(&file)));
            run_event(workspace_root.as_deref(), output.as_deref(), Some(&lang)).await
        }
        Commands::Print {
            on_save,
            workspace_root,
            output,
        } => {
            let trigger = if on_save {
                Trigger::OnSave
            } else {
                Trigger::Manual
            };
            print_plans(workspace_root.as_deref(), output.as_deref(), trigger)
        }
    };
    std::process::exit(code);
}

/// Run a manual update (`saved_language = None`) or a save event, wait for
/// every launched process, and return the exit code.
async fn run_event(
    workspace_root: Option<&str>,
    output_mode: Option<&str>,
    saved_language: Option<&str>,
) -> i32 {
    let (eff, problem) = config::resolve_effective(workspace_root, output_mode);
    logging::init_with_config(&eff.settings.logging);

    let json = eff.output == "json";
    let collector = Arc::new(Collector::new());
    let console = Arc::new(ConsoleReporter::new(output::use_colors(&eff.output)));
    let reporter: Arc<dyn Reporter> = if json {
        collector.clone()
    } else {
        console.clone()
    };
    if let Some(d) = problem {
        reporter.report(d);
    }

    let launcher = ShellLauncher::new(Handle::current());
    let launcher = match eff.workspace_root.as_deref() {
        Some(root) => launcher.in_dir(root),
        None => launcher,
    };
    let provider = CtagsProvider::new(
        eff.settings.ctags_process.as_ref(),
        Box::new(launcher),
        Arc::clone(&reporter),
    );
    let root = eff.workspace_root.as_deref();
    let handles = match saved_language {
        Some(lang) => provider.on_save(lang, root),
        None => provider.update_ctags(Trigger::Manual, root),
    };
    let launched = handles.len();
    for h in handles {
        if let Err(e) = h.await {
            tracing::error!("[runner] launch task failed: {e}");
        }
    }

    let errors = if json {
        let diagnostics = collector.diagnostics();
        output::print_run_json(launched, &diagnostics);
        diagnostics.len()
    } else {
        console.count()
    };
    if errors > 0 {
        1
    } else {
        0
    }
}

/// Dry run: print what each entry would do.
fn print_plans(workspace_root: Option<&str>, output_mode: Option<&str>, trigger: Trigger) -> i32 {
    let (eff, problem) = config::resolve_effective(workspace_root, output_mode);
    logging::init_with_config(&eff.settings.logging);

    let collector = Collector::new();
    if let Some(d) = problem {
        collector.report(d);
    }
    let configs = loader::normalize(eff.settings.ctags_process.as_ref(), &collector);
    let mut extra = collector.diagnostics();
    let plans = runner::plan(&configs, trigger, eff.workspace_root.as_deref()).unwrap_or_else(|| {
        extra.push(Diagnostic::MissingWorkspace);
        Vec::new()
    });
    output::print_plans(&plans, &extra, &eff.output);

    let invalid = plans.iter().filter(|p| matches!(p, Plan::Invalid(_))).count();
    if extra.len() + invalid > 0 {
        1
    } else {
        0
    }
}
