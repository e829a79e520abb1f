use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{read as event_read, Event as CrosstermEvent};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::io::stdout;
use std::path::PathBuf;
use vedit::{
    config::Config,
    editor::{Editor, Flow},
    filestore::StdFileStore,
    input::translate_key,
    logs,
    mode::Mode,
    prompt::{FilenamePrompt, PromptOutcome},
    view::{self, Screen, Viewport},
};

/// A small modal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "vedit")]
#[command(version)]
struct Cli {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for editor diagnostics
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> AnyhowResult<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    // CLI flag wins over the config file
    if let Some(log_file) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logs::init_global(log_file, &config.logging.filter)
            .with_context(|| format!("failed to open log file {}", log_file.display()))?;
    }

    let editor = match &cli.file {
        Some(path) => match Editor::open(StdFileStore::new(), &config, path) {
            Ok(editor) => editor,
            Err(e) => {
                tracing::error!("failed to open {}: {}", path.display(), e);
                eprintln!("vedit: {e}");
                std::process::exit(1);
            }
        },
        None => Editor::new(StdFileStore::new(), &config),
    };

    tracing::info!(file = ?cli.file, "starting editor");
    let terminal = ratatui::init();
    let result = run(terminal, editor);
    if let Err(e) = execute!(stdout(), SetCursorStyle::DefaultUserShape) {
        tracing::warn!("failed to reset cursor style: {}", e);
    }
    ratatui::restore();
    result
}

fn run(mut terminal: DefaultTerminal, mut editor: Editor<StdFileStore>) -> AnyhowResult<()> {
    let mut viewport = Viewport::default();
    let mut prompt: Option<FilenamePrompt> = None;
    let mut bar_cursor = None;

    loop {
        let want_bar = prompt.is_some() || editor.document().mode() == Mode::Insert;
        if bar_cursor != Some(want_bar) {
            let style = if want_bar {
                SetCursorStyle::SteadyBar
            } else {
                SetCursorStyle::SteadyBlock
            };
            execute!(stdout(), style)?;
            bar_cursor = Some(want_bar);
        }

        terminal.draw(|frame| {
            let screen = Screen {
                view: editor.view(),
                status_message: editor.status_message(),
                prompt: prompt.as_ref(),
            };
            view::render(frame, &mut viewport, &screen);
        })?;

        let CrosstermEvent::Key(event) = event_read()? else {
            continue;
        };
        let Some(key) = translate_key(&event) else {
            continue;
        };

        if let Some(active) = prompt.as_mut() {
            match active.handle_key(key) {
                PromptOutcome::Pending => {}
                PromptOutcome::Cancelled => {
                    prompt = None;
                    editor.set_status_message("Save cancelled");
                }
                PromptOutcome::Submitted(path) => {
                    prompt = None;
                    // failure is reported on the status line
                    let _ = editor.save_as(path);
                }
            }
            continue;
        }

        match editor.handle_key(key) {
            Flow::Continue => {}
            Flow::NeedFileName => prompt = Some(FilenamePrompt::new()),
            Flow::Quit => return Ok(()),
        }
    }
}
