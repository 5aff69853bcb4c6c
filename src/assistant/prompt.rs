//! Prompt templates for the six modes.
//!
//! `{name}` markers are placeholders filled by [`render_template`], not
//! format arguments.
#![allow(clippy::literal_string_with_formatting_args)]

pub const GENERATE_TEMPLATE: &str = "Generate production-ready {language} code for the following task: \"{task}\".\n\
     Also provide a brief explanation of how it works.";

pub const ANALYZE_TEMPLATE: &str = "Code to analyze:\n{code}\n\n\
     Task: Analyze this {language} code.\n\
     1. Explain the logic.\n\
     2. Determine the time and space complexity (Big O).\n\
     3. List security vulnerabilities (e.g. SQL injection, XSS).\n\
     4. List improvements.\n\
     5. Rate quality on a 1-10 scale for readability, maintainability, security, performance and structure.";

pub const CONVERT_TEMPLATE: &str = "Code:\n{code}\n\n\
     Convert the code above from {from} to {to}. \
     Ensure idiomatic usage of the target language.";

pub const DIFF_TEMPLATE: &str = "Original Code:\n{old_code}\n\n\
     New Code:\n{new_code}\n\n\
     Task: Compare these two versions of code.\n\
     1. Summarize the differences.\n\
     2. List specific changes.\n\
     3. Assess any new risks or improvements.";

pub const FLOWCHART_TEMPLATE: &str = "Code:\n{code}\n\n\
     Generate scalable vector graphic (SVG) markup that represents the flowchart logic of this code.\n\
     Do not wrap it in markdown. Return ONLY the raw SVG, starting with <svg and ending with </svg>.\n\
     Use a dark theme for the flowchart elements (white or light gray strokes, transparent or dark fills).";

pub const RUNNER_TEMPLATE: &str = "Code:\n{code}\n\n\
     Act as a {language} interpreter. Simulate the execution of this code and show the console output.\n\
     If there are errors, show the stack trace. Return only the output text.";

/// Substitutes `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so code that happens to contain
/// `{code}` or `{language}` is embedded verbatim. Unknown placeholders are
/// kept as written.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, value)| value.len()).sum();
    let mut rendered = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            rendered.push_str(&rest[open..]);
            return rendered;
        };

        let name = &after[..close];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => rendered.push_str(value),
            None => rendered.push_str(&rest[open..=open + 1 + close]),
        }
        rest = &after[close + 1..];
    }

    rendered.push_str(rest);
    rendered
}

pub fn build_generate_prompt(task: &str, language: &str) -> String {
    render_template(GENERATE_TEMPLATE, &[("language", language), ("task", task)])
}

pub fn build_analyze_prompt(code: &str, language: &str) -> String {
    render_template(ANALYZE_TEMPLATE, &[("code", code), ("language", language)])
}

pub fn build_convert_prompt(code: &str, from: &str, to: &str) -> String {
    render_template(
        CONVERT_TEMPLATE,
        &[("code", code), ("from", from), ("to", to)],
    )
}

pub fn build_diff_prompt(old_code: &str, new_code: &str) -> String {
    render_template(
        DIFF_TEMPLATE,
        &[("old_code", old_code), ("new_code", new_code)],
    )
}

pub fn build_flowchart_prompt(code: &str) -> String {
    render_template(FLOWCHART_TEMPLATE, &[("code", code)])
}

pub fn build_runner_prompt(code: &str, language: &str) -> String {
    render_template(RUNNER_TEMPLATE, &[("code", code), ("language", language)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_substitutes_all_placeholders() {
        let rendered = render_template("{a} and {b} and {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(rendered, "x and y and x");
    }

    #[test]
    fn test_render_template_keeps_unknown_placeholders() {
        let rendered = render_template("fn {name}() {}", &[("other", "x")]);
        assert_eq!(rendered, "fn {name}() {}");
    }

    #[test]
    fn test_render_template_unclosed_brace() {
        let rendered = render_template("map = {code", &[("code", "x")]);
        assert_eq!(rendered, "map = {code");
    }

    #[test]
    fn test_render_template_does_not_rescan_values() {
        let old = "let s = \"{new_code}\";";
        let prompt = build_diff_prompt(old, "let s = 1;");
        assert!(prompt.contains("let s = \"{new_code}\";"));
        assert_eq!(prompt.matches("let s = 1;").count(), 1);
    }

    #[test]
    fn test_build_generate_prompt() {
        let prompt = build_generate_prompt("a JWT login API", "Go");
        assert!(prompt.starts_with("Generate production-ready Go code"));
        assert!(prompt.contains("\"a JWT login API\""));
        assert!(prompt.contains("brief explanation"));
    }

    #[test]
    fn test_build_analyze_prompt_embeds_code_first() {
        let prompt = build_analyze_prompt("SELECT * FROM users", "SQL");
        assert!(prompt.starts_with("Code to analyze:\nSELECT * FROM users\n\nTask:"));
        assert!(prompt.contains("Analyze this SQL code."));
        assert!(prompt.contains("Big O"));
    }

    #[test]
    fn test_build_convert_prompt() {
        let prompt = build_convert_prompt("print('hi')", "Python", "JavaScript");
        assert!(prompt.starts_with("Code:\nprint('hi')\n\n"));
        assert!(prompt.contains("from Python to JavaScript"));
    }

    #[test]
    fn test_build_flowchart_prompt_forbids_markdown() {
        let prompt = build_flowchart_prompt("x = 1");
        assert!(prompt.contains("Do not wrap it in markdown"));
        assert!(prompt.contains("<svg"));
    }

    #[test]
    fn test_build_runner_prompt() {
        let prompt = build_runner_prompt("fn main() {}", "Rust");
        assert!(prompt.contains("Act as a Rust interpreter"));
        assert!(prompt.contains("stack trace"));
    }
}
