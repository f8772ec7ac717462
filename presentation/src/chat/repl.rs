//! REPL (Read-Eval-Print Loop) for interactive exam generation.
//!
//! The REPL is the external caller of the generation core. It owns the
//! session caches: the context index and extracted example text are
//! memoized keyed on file path and rebuilt only when the path changes.

use crate::cache::KeyedCache;
use crate::output::console::ConsoleFormatter;
use crate::output::renderer::render_stream;
use crate::progress::reporter::SpinnerReporter;
use colored::Colorize;
use examforge_application::ports::document_source::DocumentSource;
use examforge_application::ports::progress::{GenerationProgress, NoProgress};
use examforge_application::{PrepareContextUseCase, RunGeneralUseCase, RunGroundedUseCase};
use examforge_domain::{ContextIndex, GenerationRequest};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opens a document source for a path. Injected so this layer stays
/// independent of concrete extraction backends.
pub type DocumentOpener = Box<dyn Fn(&Path) -> Box<dyn DocumentSource> + Send + Sync>;

/// Session-level options toggled from the CLI or `/key`.
pub struct SessionOptions {
    pub include_answer_key: bool,
    pub show_progress: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            include_answer_key: true,
            show_progress: true,
        }
    }
}

/// Interactive exam-generation REPL
pub struct ChatRepl {
    general: RunGeneralUseCase,
    grounded: RunGroundedUseCase,
    prepare: PrepareContextUseCase,
    open_document: DocumentOpener,
    options: SessionOptions,
    document: Option<PathBuf>,
    examples: Option<PathBuf>,
    index_cache: KeyedCache<Arc<ContextIndex>>,
    example_cache: KeyedCache<String>,
}

impl ChatRepl {
    pub fn new(
        general: RunGeneralUseCase,
        grounded: RunGroundedUseCase,
        prepare: PrepareContextUseCase,
        open_document: DocumentOpener,
    ) -> Self {
        Self {
            general,
            grounded,
            prepare,
            open_document,
            options: SessionOptions::default(),
            document: None,
            examples: None,
            index_cache: KeyedCache::new(),
            example_cache: KeyedCache::new(),
        }
    }

    /// Set the course document used to ground generation.
    pub fn with_document(mut self, document: Option<PathBuf>) -> Self {
        self.document = document;
        self
    }

    /// Set the example-questions file.
    pub fn with_examples(mut self, examples: Option<PathBuf>) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("examforge").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_prompt(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          examforge - Chat Mode              │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        match &self.document {
            Some(path) => println!("Course document: {}", path.display()),
            None => println!("Course document: none (general-knowledge mode)"),
        }
        if let Some(path) = &self.examples {
            println!("Example questions: {}", path.display());
        }
        println!(
            "Answer key: {}",
            if self.options.include_answer_key {
                "on"
            } else {
                "off"
            }
        );
        println!();
        println!("Commands:");
        println!("  /doc <path>      - Set (or /doc off to clear) the course document");
        println!("  /examples <path> - Set (or /examples off to clear) the example file");
        println!("  /key on|off      - Toggle the answer key");
        println!("  /status          - Show current session state");
        println!("  /help            - Show this help");
        println!("  /quit            - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        let mut parts = cmd.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let argument = parts.next();

        match command {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                self.print_welcome();
                false
            }
            "/doc" => {
                match argument {
                    Some("off") | Some("none") => {
                        self.document = None;
                        println!("Course document cleared; general-knowledge mode.");
                    }
                    Some(path) => {
                        self.document = Some(PathBuf::from(path));
                        println!("Course document set to '{}'.", path);
                    }
                    None => println!("Usage: /doc <path> | /doc off"),
                }
                false
            }
            "/examples" => {
                match argument {
                    Some("off") | Some("none") => {
                        self.examples = None;
                        println!("Example file cleared.");
                    }
                    Some(path) => {
                        self.examples = Some(PathBuf::from(path));
                        println!("Example file set to '{}'.", path);
                    }
                    None => println!("Usage: /examples <path> | /examples off"),
                }
                false
            }
            "/key" => {
                match argument {
                    Some("on") => {
                        self.options.include_answer_key = true;
                        println!("Answer key on.");
                    }
                    Some("off") => {
                        self.options.include_answer_key = false;
                        println!("Answer key off.");
                    }
                    _ => println!("Usage: /key on|off"),
                }
                false
            }
            "/status" => {
                match &self.document {
                    Some(path) => println!("Course document: {}", path.display()),
                    None => println!("Course document: none"),
                }
                match &self.examples {
                    Some(path) => println!("Example questions: {}", path.display()),
                    None => println!("Example questions: none"),
                }
                println!(
                    "Answer key: {}",
                    if self.options.include_answer_key {
                        "on"
                    } else {
                        "off"
                    }
                );
                false
            }
            _ => {
                println!("Unknown command: {}", command);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_prompt(&mut self, line: &str) {
        let Some(request) = GenerationRequest::try_new(line) else {
            return;
        };
        let request = request
            .with_examples(self.example_text())
            .with_answer_key(self.options.include_answer_key);

        println!();

        let progress: Box<dyn GenerationProgress> = if self.options.show_progress {
            Box::new(SpinnerReporter::new())
        } else {
            Box::new(NoProgress)
        };

        let handle = if self.document.is_some() {
            let Some(index) = self.ensure_index().await else {
                return;
            };
            self.grounded
                .execute(&request, &index, progress.as_ref())
                .await
        } else {
            self.general.execute(&request, progress.as_ref()).await
        };

        let full_text = render_stream(handle).await;
        println!(
            "{}",
            ConsoleFormatter::format_final(&full_text, request.include_answer_key())
        );
        println!();
    }

    /// Get the context index for the current document, building and
    /// caching it on first use or when the document path changed.
    async fn ensure_index(&mut self) -> Option<Arc<ContextIndex>> {
        let path = self.document.clone()?;

        if let Some(index) = self.index_cache.get(&path) {
            return Some(index.clone());
        }

        println!("Processing '{}'...", path.display());
        let source = (self.open_document)(&path);
        match self.prepare.build_index(source.as_ref()).await {
            Ok(index) => {
                let index = Arc::new(index);
                self.index_cache.insert(path, index.clone());
                Some(index)
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Could not prepare '{}': {}", path.display(), e).red()
                );
                None
            }
        }
    }

    /// Get the example text for the current example file, cached keyed
    /// on path. Extraction failures degrade to an empty string.
    fn example_text(&mut self) -> String {
        let Some(path) = self.examples.clone() else {
            return String::new();
        };

        if let Some(text) = self.example_cache.get(&path) {
            return text.clone();
        }

        let source = (self.open_document)(&path);
        let text = PrepareContextUseCase::extract_example_text(source.as_ref());
        self.example_cache.insert(path, text.clone());
        text
    }
}
