mod app;
mod config;
mod domain;
mod error;
mod input;
mod persistence;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{config_file, load_config_or_default, Config};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{format_time, parse_time, TaskId, TaskListStore};
use persistence::{ensure_data_dir, init_local_dir, load_snapshot_or_empty, log_file, save_snapshot};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasktime")]
#[command(about = "A small terminal task timer: one running task, cumulative time per task", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Maximum number of tasks (overrides config.json)
    #[arg(long, global = true)]
    max_tasks: Option<usize>,

    /// Task file, relative to the data directory unless absolute
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tasktime directory in the current directory
    Init,
    /// Print every task with its time and the total
    List,
    /// Append a task
    Add {
        description: String,
        /// Starting time (hh:mm:ss, mm:ss or seconds)
        #[arg(short, long)]
        time: Option<String>,
    },
    /// Remove a task; later tasks are renumbered
    Remove { id: u32 },
    /// Overwrite a task's time (hh:mm:ss, mm:ss or seconds)
    SetTime { id: u32, time: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let dir = init_local_dir()?;
        println!("Initialized tasktime directory: {}", dir.display());
        println!("Run 'tasktime' here to start tracking tasks.");
        return Ok(());
    }

    let data_dir = ensure_data_dir()?;
    let headless = cli.command.is_some();
    init_logging(cli.verbose, (!headless).then(|| log_file(&data_dir)).as_deref())?;

    let config = load_config_or_default(config_file(&data_dir)).with_overrides(cli.max_tasks, cli.data_file);
    let data_path = config.data_path(&data_dir);
    let mut store = TaskListStore::import_snapshot(load_snapshot_or_empty(&data_path), config.max_tasks);

    match cli.command {
        None => run_tui(store, data_path, &config),
        Some(Commands::Init) => Ok(()),
        Some(Commands::List) => {
            print_tasks(&store);
            Ok(())
        }
        Some(Commands::Add { description, time }) => {
            let seconds = parse_time(time.as_deref().unwrap_or(""))?;
            let id = store.add_task(description, seconds)?;
            save_store(&store, &data_path)?;
            println!("Added task {}", id);
            Ok(())
        }
        Some(Commands::Remove { id }) => {
            let removed = store.remove_task(TaskId(id))?;
            save_store(&store, &data_path)?;
            println!("Removed {}", removed);
            Ok(())
        }
        Some(Commands::SetTime { id, time }) => {
            let seconds = parse_time(&time)?;
            store.set_time(TaskId(id), seconds)?;
            save_store(&store, &data_path)?;
            println!("Task {} set to {}", id, format_time(seconds));
            Ok(())
        }
    }
}

/// Log to a file under the TUI (stdout is the terminal) and to stderr otherwise
fn init_logging(verbose: bool, log_path: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TASKTIME_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn save_store(store: &TaskListStore, data_path: &Path) -> Result<()> {
    save_snapshot(data_path, &store.export_snapshot())
        .with_context(|| format!("Failed to save tasks to {}", data_path.display()))
}

fn print_tasks(store: &TaskListStore) {
    if store.is_empty() {
        println!("No tasks.");
        return;
    }
    for task in store.tasks() {
        println!("#{:<3} {}  {}", task.id.0, format_time(task.tracker.elapsed_seconds()), task.description);
    }
    println!("Total {}", format_time(store.total_seconds_at(std::time::Instant::now())));
}

fn run_tui(store: TaskListStore, data_path: PathBuf, config: &Config) -> Result<()> {
    info!(path = %data_path.display(), tasks = store.len(), "starting");
    let mut app = AppState::new(store, data_path, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Stop tracking and save on exit
    if let Err(e) = app.shutdown() {
        eprintln!("Error saving tasks: {}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        app.tick();

        if let Err(e) = app.autosave() {
            warn!(error = %e, "autosave failed");
            app.set_status(format!("Autosave failed: {}", e));
        }
    }
}
