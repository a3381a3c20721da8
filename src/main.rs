use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use taskpad::commands::*;
use taskpad::store::TaskStore;
use taskpad::tui::run_tui;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "Terminal task manager with subtasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Longer description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// Due date, e.g. 2026-09-01 or 2026-09-01T18:00
        #[arg(short, long)]
        due: Option<String>,
        /// Priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
        /// Subtask title; repeat for several (makes the task a series)
        #[arg(short, long = "subtask")]
        subtask: Vec<String>,
        /// Create a series task even without subtasks
        #[arg(long)]
        series: bool,
    },
    /// List tasks
    List {
        /// Show completed tasks too
        #[arg(short, long)]
        all: bool,
    },
    /// Show full details of a task
    Show {
        /// Task id (or unique prefix)
        id: String,
    },
    /// Toggle a task's completed flag
    Complete {
        /// Task id (or unique prefix)
        id: String,
    },
    /// Remove a task
    Remove {
        /// Task id (or unique prefix)
        id: String,
    },
    /// Edit a task
    Edit {
        /// Task id (or unique prefix)
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// New due date
        #[arg(short, long)]
        due: Option<String>,
        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete all tasks
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add {
            title,
            description,
            due,
            priority,
            category,
            subtask,
            series,
        }) => {
            let mut store = TaskStore::open_default();
            cmd_add(
                &mut store, title, description, due, priority, category, subtask, series, false,
            );
            store.flush();
        }
        Some(Commands::List { all }) => {
            let store = TaskStore::open_default();
            cmd_list(&store, all);
        }
        Some(Commands::Show { id }) => {
            let store = TaskStore::open_default();
            cmd_show(&store, &id);
        }
        Some(Commands::Complete { id }) => {
            let mut store = TaskStore::open_default();
            cmd_complete(&mut store, &id, false);
            store.flush();
        }
        Some(Commands::Remove { id }) => {
            let mut store = TaskStore::open_default();
            cmd_remove(&mut store, &id, false);
            store.flush();
        }
        Some(Commands::Edit {
            id,
            title,
            description,
            due,
            priority,
            category,
        }) => {
            let mut store = TaskStore::open_default();
            cmd_edit(&mut store, &id, title, description, due, priority, category, false);
            store.flush();
        }
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "taskpad", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            let store = TaskStore::open_default();
            if let Err(e) = run_tui(store) {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
