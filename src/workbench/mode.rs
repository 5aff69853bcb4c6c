use std::fmt;
use std::str::FromStr;

/// One of the six mutually exclusive workbench contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Generate,
    Analyze,
    Convert,
    Diff,
    Flowchart,
    Runner,
}

impl Mode {
    pub const ALL: [Self; 6] = [
        Self::Generate,
        Self::Analyze,
        Self::Convert,
        Self::Diff,
        Self::Flowchart,
        Self::Runner,
    ];

    /// Name used on the command line and in `/mode`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Analyze => "analyze",
            Self::Convert => "convert",
            Self::Diff => "diff",
            Self::Flowchart => "flowchart",
            Self::Runner => "run",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Generate => "Generator",
            Self::Analyze => "Inspector",
            Self::Convert => "Converter",
            Self::Diff => "Diff Viewer",
            Self::Flowchart => "Visualizer",
            Self::Runner => "Simulate",
        }
    }

    /// Label of the action control.
    pub const fn action_label(self) -> &'static str {
        match self {
            Self::Generate => "Generate",
            Self::Analyze => "Analyze",
            Self::Convert => "Convert",
            Self::Diff => "Compare",
            Self::Flowchart => "Visualize",
            Self::Runner => "Run Simulation",
        }
    }

    /// Spinner text while the mode's request is in flight.
    pub const fn progress_message(self) -> &'static str {
        match self {
            Self::Generate => "Generating...",
            Self::Analyze => "Analyzing...",
            Self::Convert => "Converting...",
            Self::Diff => "Comparing...",
            Self::Flowchart => "Drawing flowchart...",
            Self::Runner => "Simulating...",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Generate => "Generate code from a natural-language prompt",
            Self::Analyze => "Explain code, estimate complexity, list issues and rate quality",
            Self::Convert => "Convert code to another language",
            Self::Diff => "Compare two versions of code",
            Self::Flowchart => "Draw the code's control flow as an SVG flowchart",
            Self::Runner => "Simulate running the code and show its console output",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generate" | "gen" | "generator" => Ok(Self::Generate),
            "analyze" | "analyse" | "inspect" | "inspector" => Ok(Self::Analyze),
            "convert" | "converter" => Ok(Self::Convert),
            "diff" | "compare" => Ok(Self::Diff),
            "flowchart" | "visualize" | "visualise" => Ok(Self::Flowchart),
            "run" | "runner" | "simulate" => Ok(Self::Runner),
            other => anyhow::bail!(
                "Unknown mode: '{other}'\n\
                 Available: {}",
                Self::ALL.map(Self::key).join(", ")
            ),
        }
    }
}
