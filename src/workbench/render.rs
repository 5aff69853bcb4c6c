//! Text views of the result slot.

use std::fmt::Write;

use serde_json::{Value, json};

use super::state::ResultSlot;
use crate::assistant::CodeAnalysis;
use crate::ui::{Style, score_bar};

const EMPTY_STATE: &str = "Ready to process code";
const NO_ISSUES: &str = "No critical issues found.";

/// Renders the slot for the terminal. Writes never fail on a `String`.
pub fn render_slot(slot: &ResultSlot) -> String {
    let mut out = String::new();

    match slot {
        ResultSlot::Empty => {
            let _ = writeln!(out, "{}", Style::hint(EMPTY_STATE));
        }
        ResultSlot::Generated(result) => {
            section(&mut out, "Generated Result");
            let _ = writeln!(out, "{}", Style::code(&result.code));
            let _ = writeln!(out);
            section(&mut out, "Explanation");
            let _ = writeln!(out, "{}", result.explanation);
        }
        ResultSlot::Analysis(analysis) => render_analysis(&mut out, analysis),
        ResultSlot::Diff(report) => {
            section(&mut out, "Comparison Report");
            let _ = writeln!(out, "{}", report.summary);
            let _ = writeln!(out);
            section(&mut out, "Key Changes");
            bullets(&mut out, &report.changes, "•");
            let _ = writeln!(out);
            section(&mut out, "Risk Assessment");
            let _ = writeln!(out, "{}", Style::warning(&report.risk_assessment));
        }
        ResultSlot::Flowchart(svg) => {
            section(&mut out, "Visual Logic Graph");
            let _ = writeln!(out, "{svg}");
        }
        ResultSlot::Runner(output) => {
            section(&mut out, "Console Output (Simulated)");
            let _ = writeln!(out, "{}", Style::code(output));
        }
    }

    out
}

fn render_analysis(out: &mut String, analysis: &CodeAnalysis) {
    section(out, "Quality Score");
    for (label, score) in analysis.quality_score.entries() {
        let _ = writeln!(
            out,
            "  {} {} {}",
            Style::label(format!("{label:<16}")),
            score_bar(score),
            Style::value(format!("{score:.1}"))
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{}  {}",
        Style::label("Time Complexity"),
        Style::value(&analysis.time_complexity)
    );
    let _ = writeln!(
        out,
        "{}  {}",
        Style::label("Space Complexity"),
        Style::value(&analysis.space_complexity)
    );
    let _ = writeln!(out);

    section(out, "Code Logic");
    let _ = writeln!(out, "{}", analysis.explanation);
    let _ = writeln!(out);

    section(out, "Security Vulnerabilities");
    if analysis.security_issues.is_empty() {
        let _ = writeln!(out, "  {}", Style::success(NO_ISSUES));
    } else {
        bullets(out, &analysis.security_issues, "!");
    }
    let _ = writeln!(out);

    section(out, "Suggested Optimizations");
    bullets(out, &analysis.improvements, "•");
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", Style::header(title));
}

fn bullets(out: &mut String, items: &[String], marker: &str) {
    for item in items {
        let _ = writeln!(out, "  {marker} {item}");
    }
}

/// Machine-readable form of the slot for `--json`.
pub fn to_json(slot: &ResultSlot) -> Value {
    match slot {
        ResultSlot::Empty => Value::Null,
        ResultSlot::Generated(result) => json!(result),
        ResultSlot::Analysis(analysis) => json!(analysis),
        ResultSlot::Diff(report) => json!(report),
        ResultSlot::Flowchart(svg) => json!({ "svg": svg }),
        ResultSlot::Runner(output) => json!({ "output": output }),
    }
}
