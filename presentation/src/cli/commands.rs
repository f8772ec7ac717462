//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for examforge
#[derive(Parser, Debug)]
#[command(name = "examforge")]
#[command(author, version, about = "AI exam question generator with a self-critique loop")]
#[command(long_about = r#"
examforge generates exam questions from general knowledge or from an
uploaded course document.

With a course document, generation runs a 3-agent refinement chain:
1. Generate: draft questions grounded in the most relevant passages
2. Critique: a strict examiner reviews the draft against a rubric
3. Refine: rewrite the draft to fix every critique point (skipped when
   the critique finds nothing wrong)

Without a document, a single generator answers from general knowledge.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./examforge.toml    Project-level config
3. ~/.config/examforge/config.toml   Global config

Example:
  examforge "Generate 5 multiple-choice questions on social deviance"
  examforge -d lecture-notes.pdf "3 true/false questions on chapter 2"
  examforge --chat -d lecture-notes.pdf -e past-exam.txt
"#)]
pub struct Cli {
    /// The generation request (not required in chat mode)
    pub prompt: Option<String>,

    /// Start interactive chat mode
    #[arg(long)]
    pub chat: bool,

    /// Course document to ground the questions in (PDF or text)
    #[arg(short, long, value_name = "PATH")]
    pub document: Option<PathBuf>,

    /// Example questions whose style should be matched (PDF or text)
    #[arg(short, long, value_name = "PATH")]
    pub examples: Option<PathBuf>,

    /// Do not request an answer key
    #[arg(long)]
    pub no_answer_key: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
