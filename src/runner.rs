//! Runs one ctags invocation per eligible entry.
//!
//! The loop is synchronous; each launch is handed to a `Launcher` which
//! starts the process without waiting for it. Completion is observed on the
//! launched task, which reports failures on its own. Entries never share
//! state, so completions may arrive in any order.

use crate::command::build_command;
use crate::error::Diagnostic;
use crate::models::{ConfigSet, ProcessConfig, Trigger};
use crate::report::Reporter;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Starts a shell command without blocking the caller.
///
/// Implementations own whatever drives the launched work, so `launch` (and
/// therefore `run`) may be called from plain synchronous code.
pub trait Launcher: Send + Sync {
    /// Launch `command` for entry `index`. Failures go to `reporter` from the
    /// completion side; the returned handle resolves once the run is over.
    fn launch(&self, index: usize, command: String, reporter: Arc<dyn Reporter>) -> JoinHandle<()>;
}

/// Production launcher: platform shell through `tokio::process`, spawned on
/// the runtime behind `runtime`.
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    runtime: Handle,
    cwd: Option<PathBuf>,
}

impl ShellLauncher {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime, cwd: None }
    }

    /// Run commands from `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    fn shell_command(&self, command: &str) -> tokio::process::Command {
        let mut cmd = platform_shell(command);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

/// `cmd /C` takes the command line as-is; regular argument quoting would
/// escape the embedded `"` and cmd.exe never undoes that.
#[cfg(windows)]
fn platform_shell(command: &str) -> tokio::process::Command {
    let mut c = tokio::process::Command::new("cmd");
    c.arg("/C").raw_arg(command);
    c
}

#[cfg(not(windows))]
fn platform_shell(command: &str) -> tokio::process::Command {
    let mut c = tokio::process::Command::new("sh");
    c.arg("-c").arg(command);
    c
}

impl Launcher for ShellLauncher {
    fn launch(&self, index: usize, command: String, reporter: Arc<dyn Reporter>) -> JoinHandle<()> {
        let mut cmd = self.shell_command(&command);
        self.runtime.spawn(async move {
            tracing::debug!("[runner] launching entry {index}: {command}");
            match cmd.output().await {
                Ok(out) if out.status.success() => {
                    tracing::debug!("[runner] entry {index} finished");
                }
                Ok(out) => {
                    let stderr = String::from_utf8_lossy(&out.stderr);
                    let stderr = stderr.trim();
                    let detail = if stderr.is_empty() {
                        format!("Command failed ({}): {}", out.status, command)
                    } else {
                        format!("Command failed ({}): {}\n{}", out.status, command, stderr)
                    };
                    reporter.report(Diagnostic::ProcessFailure { index, detail });
                }
                Err(e) => {
                    reporter.report(Diagnostic::ProcessFailure {
                        index,
                        detail: e.to_string(),
                    });
                }
            }
        })
    }
}

/// Outcome of evaluating one entry without launching anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// On-save trigger and the entry has `runOnSave = false`.
    Skipped,
    Invalid(Diagnostic),
    Run(String),
}

/// Decide what to do with one entry for the given trigger and root.
pub fn plan_entry(index: usize, cfg: &ProcessConfig, trigger: Trigger, root: &Path) -> Plan {
    if trigger == Trigger::OnSave && !cfg.run_on_save {
        return Plan::Skipped;
    }
    if cfg.tag_file_path.is_empty() {
        return Plan::Invalid(Diagnostic::EmptyRequiredField {
            index,
            field: "tagFilePath".into(),
        });
    }
    if cfg.file_extensions.is_empty() {
        return Plan::Invalid(Diagnostic::EmptyRequiredField {
            index,
            field: "fileExtensions".into(),
        });
    }
    Plan::Run(build_command(cfg, root))
}

/// Plan every entry. `None` when there is no workspace root; the caller
/// reports that as a single `MissingWorkspace`.
pub fn plan(configs: &ConfigSet, trigger: Trigger, workspace_root: Option<&Path>) -> Option<Vec<Plan>> {
    let root = workspace_root?;
    Some(
        configs
            .iter()
            .enumerate()
            .map(|(index, cfg)| plan_entry(index, cfg, trigger, root))
            .collect(),
    )
}

/// Launch ctags for every eligible entry. Returns as soon as all launches
/// are issued, without waiting on any child; the handles let a driver wait
/// for completion.
pub fn run(
    configs: &ConfigSet,
    trigger: Trigger,
    workspace_root: Option<&Path>,
    launcher: &dyn Launcher,
    reporter: Arc<dyn Reporter>,
) -> Vec<JoinHandle<()>> {
    let Some(plans) = plan(configs, trigger, workspace_root) else {
        reporter.report(Diagnostic::MissingWorkspace);
        return Vec::new();
    };
    let mut handles = Vec::new();
    for (index, p) in plans.into_iter().enumerate() {
        match p {
            Plan::Skipped => {
                tracing::debug!("[runner] entry {index} skipped: runOnSave is false");
            }
            Plan::Invalid(d) => reporter.report(d),
            Plan::Run(command) => {
                handles.push(launcher.launch(index, command, Arc::clone(&reporter)));
            }
        }
    }
    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Collector;
    use parking_lot::Mutex;
    use std::path::MAIN_SEPARATOR;

    #[derive(Default)]
    struct Recording {
        launched: Mutex<Vec<(usize, String)>>,
    }

    impl Launcher for Recording {
        fn launch(&self, index: usize, command: String, _reporter: Arc<dyn Reporter>) -> JoinHandle<()> {
            self.launched.lock().push((index, command));
            tokio::spawn(async {})
        }
    }

    fn valid(tag: &str) -> ProcessConfig {
        ProcessConfig {
            tag_file_path: tag.into(),
            ..ProcessConfig::default()
        }
    }

    #[tokio::test]
    async fn test_missing_workspace_launches_nothing() {
        let rec = Recording::default();
        let col = Arc::new(Collector::new());
        let set = ConfigSet::new(vec![valid("a"), valid("b")]);
        let handles = run(&set, Trigger::Manual, None, &rec, col.clone());
        assert!(handles.is_empty());
        assert!(rec.launched.lock().is_empty());
        assert_eq!(col.diagnostics(), vec![Diagnostic::MissingWorkspace]);
    }

    #[tokio::test]
    async fn test_on_save_skips_entries_without_run_on_save() {
        let rec = Recording::default();
        let col = Arc::new(Collector::new());
        let mut saving = valid("save.tags");
        saving.run_on_save = true;
        let set = ConfigSet::new(vec![valid("manual.tags"), saving]);
        run(&set, Trigger::OnSave, Some(Path::new("/proj")), &rec, col.clone());
        let launched = rec.launched.lock();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].0, 1);
        assert!(launched[0].1.contains("save.tags"));
        assert!(col.is_empty());
    }

    #[tokio::test]
    async fn test_manual_runs_regardless_of_run_on_save() {
        let rec = Recording::default();
        let col = Arc::new(Collector::new());
        let set = ConfigSet::new(vec![valid("a"), valid("b")]);
        let handles = run(&set, Trigger::Manual, Some(Path::new("/proj")), &rec, col.clone());
        assert_eq!(handles.len(), 2);
        assert_eq!(rec.launched.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_tag_file_path_is_reported() {
        let rec = Recording::default();
        let col = Arc::new(Collector::new());
        let set = ConfigSet::new(vec![valid("")]);
        run(&set, Trigger::Manual, Some(Path::new("/proj")), &rec, col.clone());
        assert!(rec.launched.lock().is_empty());
        assert_eq!(
            col.diagnostics(),
            vec![Diagnostic::EmptyRequiredField {
                index: 0,
                field: "tagFilePath".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_extensions_skips_only_that_entry() {
        let rec = Recording::default();
        let col = Arc::new(Collector::new());
        let mut broken = valid("broken.tags");
        broken.file_extensions.clear();
        let set = ConfigSet::new(vec![broken, valid("ok.tags")]);
        run(&set, Trigger::Manual, Some(Path::new("/proj")), &rec, col.clone());
        let launched = rec.launched.lock();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].0, 1);
        assert_eq!(
            col.diagnostics(),
            vec![Diagnostic::EmptyRequiredField {
                index: 0,
                field: "fileExtensions".into()
            }]
        );
    }

    #[test]
    fn test_plan_builds_expected_command() {
        let cfg = ProcessConfig {
            tag_file_path: "out.tags".into(),
            search_path: "src".into(),
            search_recursive: true,
            run_on_save: false,
            file_extensions: vec![".tjs".into(), ".foo".into()],
            extra_option: String::new(),
        };
        let Plan::Run(cmd) = plan_entry(0, &cfg, Trigger::Manual, Path::new("/proj")) else {
            panic!("expected a runnable plan");
        };
        assert!(cmd.contains("--langmap=tjs:.tjs,.foo"));
        assert!(cmd.contains(" -R "));
        assert!(cmd.contains(&format!("\"/proj{}out.tags\"", MAIN_SEPARATOR)));
        assert!(cmd.ends_with(&format!("/proj{}src*\"", MAIN_SEPARATOR)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_launcher_reports_failure_only() {
        let col = Arc::new(Collector::new());
        let launcher = ShellLauncher::new(Handle::current());
        let ok = launcher.launch(0, "true".into(), col.clone());
        let bad = launcher.launch(1, "echo boom >&2; exit 3".into(), col.clone());
        ok.await.unwrap();
        bad.await.unwrap();
        let diags = col.diagnostics();
        assert_eq!(diags.len(), 1);
        match &diags[0] {
            Diagnostic::ProcessFailure { index, detail } => {
                assert_eq!(*index, 1);
                assert!(detail.contains("boom"));
            }
            other => panic!("unexpected diagnostic: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_shell_launcher_reports_spawn_error() {
        let col = Arc::new(Collector::new());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let launcher = ShellLauncher::new(Handle::current()).in_dir(&missing);
        launcher.launch(4, "true".into(), col.clone()).await.unwrap();
        let diags = col.diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(matches!(diags[0], Diagnostic::ProcessFailure { index: 4, .. }));
    }

    #[test]
    fn test_run_from_sync_code_uses_launcher_runtime() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let col = Arc::new(Collector::new());
        let dir = tempfile::tempdir().unwrap();
        let launcher = ShellLauncher::new(rt.handle().clone()).in_dir(&dir.path().join("gone"));
        let set = ConfigSet::new(vec![valid("a.tags")]);
        // no runtime is entered on this thread
        let handles = run(&set, Trigger::Manual, Some(dir.path()), &launcher, col.clone());
        assert_eq!(handles.len(), 1);
        rt.block_on(async {
            for h in handles {
                h.await.unwrap();
            }
        });
        assert_eq!(col.len(), 1);
    }

    /// Replaces every composed command with a slow one.
    #[cfg(unix)]
    struct Slow(ShellLauncher);

    #[cfg(unix)]
    impl Launcher for Slow {
        fn launch(&self, index: usize, _command: String, reporter: Arc<dyn Reporter>) -> JoinHandle<()> {
            self.0.launch(index, "sleep 1".into(), reporter)
        }
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_returns_before_children_finish() {
        let col = Arc::new(Collector::new());
        let launcher = Slow(ShellLauncher::new(Handle::current()));
        let set = ConfigSet::new(vec![valid("a.tags"), valid("b.tags")]);
        let started = std::time::Instant::now();
        let handles = run(&set, Trigger::Manual, Some(Path::new("/proj")), &launcher, col.clone());
        assert!(started.elapsed() < std::time::Duration::from_millis(500));
        assert_eq!(handles.len(), 2);
        assert!(handles.iter().all(|h| !h.is_finished()));
        for h in handles {
            h.await.unwrap();
        }
        assert!(started.elapsed() >= std::time::Duration::from_secs(1));
        assert!(col.is_empty());
    }

    #[cfg(windows)]
    #[tokio::test]
    async fn test_shell_launcher_keeps_embedded_quotes() {
        let col = Arc::new(Collector::new());
        let launcher = ShellLauncher::new(Handle::current());
        launcher
            .launch(0, r#"if "a b"=="a b" (exit 0) else (exit 1)"#.into(), col.clone())
            .await
            .unwrap();
        assert!(col.is_empty());
    }
}
