//! Supported programming languages and name resolution.

use anyhow::Result;

use crate::ui::Style;

/// Languages offered for generation, analysis, conversion and simulation.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "Python",
    "JavaScript",
    "TypeScript",
    "Java",
    "C++",
    "C",
    "PHP",
    "Go",
    "Rust",
    "SQL",
    "HTML/CSS",
];

pub const DEFAULT_LANGUAGE: &str = "Python";
pub const DEFAULT_TARGET_LANGUAGE: &str = "JavaScript";

// Common shorthands typed on the command line.
const ALIASES: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("cpp", "C++"),
    ("cxx", "C++"),
    ("golang", "Go"),
    ("rs", "Rust"),
    ("html", "HTML/CSS"),
    ("css", "HTML/CSS"),
];

/// Prints all supported languages to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for name in SUPPORTED_LANGUAGES {
        let marker = if *name == DEFAULT_LANGUAGE {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!("  {}{marker}", Style::language(name));
    }
}

/// Resolves a user-typed language name to its canonical spelling.
///
/// Matching is case-insensitive and accepts a few shorthands (`py`, `js`,
/// `cpp`, ...).
pub fn resolve_language(name: &str) -> Result<&'static str> {
    let name = name.trim();

    if let Some(canonical) = SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.eq_ignore_ascii_case(name))
    {
        return Ok(*canonical);
    }

    if let Some((_, canonical)) = ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
    {
        return Ok(*canonical);
    }

    anyhow::bail!(
        "Unsupported language: '{name}'\n\n\
         Supported languages: {}\n\
         Run 'codecraft languages' to see the list.",
        SUPPORTED_LANGUAGES.join(", ")
    )
}
