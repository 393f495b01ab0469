use clap::{Parser, Subcommand};
use flujo::prelude::*;
use flujo::validate::is_sound;
use tracing_subscriber::EnvFilter;

/// Inspect and edit procedure documents from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the procedure document (`.json` or bincode)
    document: String,

    /// Optional editor configuration JSON (branch labels, id prefix)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the procedure as an indented tree
    Show,
    /// Print the procedure as a numbered list of steps
    Narrative,
    /// Check the document for structural problems; exits with 1 on errors
    Check,
    /// Append a new activity and save the document
    Insert {
        /// Parent activity id; omit to append at the top level
        #[arg(short, long)]
        parent: Option<String>,
        /// Branch of the parent: `yes`, `no`, or an alternative branch id
        #[arg(short, long, requires = "parent")]
        branch: Option<String>,
        /// Name of the new activity
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete an activity and everything below it, then save the document
    Delete {
        /// Id of the activity to delete
        id: String,
    },
    /// Clear every terminal activity so the procedure can be edited again
    Unlock,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config '{}': {}", path, e))
        }),
        None => EditorConfig::default(),
    };
    let document = ProcedureDocument::from_file(&cli.document).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load document '{}': {}",
            &cli.document, e
        ))
    });

    match cli.command {
        Command::Show => show(&document),
        Command::Narrative => narrative(&document),
        Command::Check => check(&document),
        Command::Insert {
            parent,
            branch,
            name,
        } => {
            let placement = match parent {
                Some(parent) => {
                    let branch = branch.unwrap_or_else(|| {
                        exit_with_error("A branch is required when inserting under a parent.")
                    });
                    Placement::under(parent, branch)
                }
                None => Placement::TopLevel,
            };
            let editor = FlowEditor::builder().with_config(config).build();
            let edit = editor
                .insert(&document.activities, placement)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            let edit = match (name, edit.created.clone()) {
                (Some(name), Some(id)) => editor
                    .update(&edit.activities, &id, ActivityPatch::new().name(name))
                    .unwrap_or_else(|e| exit_with_error(&e.to_string())),
                _ => edit,
            };
            finish(&cli.document, document, edit);
        }
        Command::Delete { id } => {
            let editor = FlowEditor::builder().with_config(config).build();
            let edit = editor
                .delete(&document.activities, &ActivityId::new(id))
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            finish(&cli.document, document, edit);
        }
        Command::Unlock => {
            let editor = FlowEditor::builder().with_config(config).build();
            let edit = editor
                .unlock(&document.activities)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            finish(&cli.document, document, edit);
        }
    }
}

fn show(document: &ProcedureDocument) {
    if !document.title.is_empty() {
        println!("{}\n", document.title);
    }
    let tree = build_tree(&document.activities);
    print!("{}", DisplayTree::new(&tree));
    if let LockState::Locked { terminal_ids } = LockState::of(&document.activities) {
        let ids: Vec<String> = terminal_ids.iter().map(ToString::to_string).collect();
        println!("\n(locked by {})", ids.join(", "));
    }
}

fn narrative(document: &ProcedureDocument) {
    for row in linearize(&document.activities) {
        let name = if row.name.is_empty() {
            "(unnamed)"
        } else {
            row.name.as_str()
        };
        println!("{:>3}. {} {}", row.display_position, name, row.next);
        if !row.responsible.is_empty() {
            println!("     Responsible: {}", row.responsible);
        }
        if !row.description.is_empty() {
            println!("     {}", row.description);
        }
    }
}

fn check(document: &ProcedureDocument) {
    let issues = validate(&document.activities);
    if issues.is_empty() {
        println!("No issues found in {} activities.", document.activities.len());
        return;
    }
    for issue in &issues {
        println!("{:?}: {}", issue.severity(), issue);
    }
    if !is_sound(&issues) {
        std::process::exit(1);
    }
}

/// Reports the edit outcome and saves the document when something changed.
fn finish(path: &str, document: ProcedureDocument, edit: Edit) {
    if let EditStatus::Unchanged(reason) = &edit.status {
        println!("Nothing to do: {:?}", reason);
        return;
    }
    if let Some(id) = &edit.created {
        println!("Created activity {}", id);
    }
    if !edit.removed.is_empty() {
        println!("Removed {} activities", edit.removed.len());
    }

    let updated = ProcedureDocument::new(document.title, edit.into_activities());
    updated
        .save(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to save '{}': {}", path, e)));
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
