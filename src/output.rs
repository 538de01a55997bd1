//! Output rendering for diagnostics and dry-run plans.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-entry fields and a top-level summary.

use crate::error::Diagnostic;
use crate::runner::Plan;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// One diagnostic line: `✖ ⟦error⟧ <message>`.
pub fn render_diagnostic(d: &Diagnostic, color: bool) -> String {
    if color {
        format!("{} {} {}", "✖".red(), "⟦error⟧".red().bold(), d)
    } else {
        format!("✖ ⟦error⟧ {}", d)
    }
}

/// Print dry-run plans, one block per entry. Invalid entries are listed as
/// diagnostics so the output stays self-contained.
pub fn print_plans(plans: &[Plan], extra: &[Diagnostic], output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_plans_json(plans, extra)).unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            for d in extra {
                println!("{}", render_diagnostic(d, color));
            }
            for (index, p) in plans.iter().enumerate() {
                let label = format!("[{}]", index);
                match p {
                    Plan::Skipped => {
                        if color {
                            println!(
                                "{} {}",
                                label.bright_black(),
                                "skipped (runOnSave = false)".bright_black()
                            );
                        } else {
                            println!("{} skipped (runOnSave = false)", label);
                        }
                    }
                    Plan::Invalid(d) => println!("{} {}", label, render_diagnostic(d, color)),
                    Plan::Run(cmd) => {
                        if color {
                            println!("{} {}", label.green().bold(), cmd);
                        } else {
                            println!("{} {}", label, cmd);
                        }
                    }
                }
            }
        }
    }
}

/// Print diagnostics collected during a run in JSON mode.
pub fn print_run_json(launched: usize, diagnostics: &[Diagnostic]) {
    let out = json!({
        "diagnostics": diagnostics,
        "summary": {
            "launched": launched,
            "errors": diagnostics.len(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
}

/// Compose the dry-run JSON object (pure) for testing purposes. `extra`
/// holds diagnostics not tied to a plan (settings, missing workspace).
pub fn compose_plans_json(plans: &[Plan], extra: &[Diagnostic]) -> JsonVal {
    let commands: Vec<_> = plans
        .iter()
        .enumerate()
        .map(|(index, p)| match p {
            Plan::Skipped => json!({ "index": index, "status": "skipped" }),
            Plan::Invalid(d) => json!({ "index": index, "status": "invalid", "message": d.to_string() }),
            Plan::Run(cmd) => json!({ "index": index, "status": "run", "command": cmd }),
        })
        .collect();
    let mut diagnostics: Vec<&Diagnostic> = extra.iter().collect();
    diagnostics.extend(plans.iter().filter_map(|p| match p {
        Plan::Invalid(d) => Some(d),
        _ => None,
    }));
    let summary = json!({
        "run": plans.iter().filter(|p| matches!(p, Plan::Run(_))).count(),
        "skipped": plans.iter().filter(|p| matches!(p, Plan::Skipped)).count(),
        "errors": diagnostics.len(),
        "total": plans.len(),
    });
    json!({ "commands": commands, "diagnostics": diagnostics, "summary": summary })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_plans_json_shape() {
        let plans = vec![
            Plan::Run("ctags --langdef=tjs".into()),
            Plan::Skipped,
            Plan::Invalid(Diagnostic::EmptyRequiredField {
                index: 2,
                field: "fileExtensions".into(),
            }),
        ];
        let out = compose_plans_json(&plans, &[Diagnostic::MalformedConfigList]);
        assert_eq!(out["summary"]["run"], 1);
        assert_eq!(out["summary"]["skipped"], 1);
        assert_eq!(out["summary"]["errors"], 2);
        assert_eq!(out["commands"][0]["command"], "ctags --langdef=tjs");
        assert_eq!(out["commands"][2]["status"], "invalid");
        assert_eq!(out["diagnostics"][1]["field"], "fileExtensions");
    }

    #[test]
    fn test_render_diagnostic_plain() {
        let line = render_diagnostic(&Diagnostic::MissingWorkspace, false);
        assert_eq!(line, "✖ ⟦error⟧ No project currently opened");
    }
}
