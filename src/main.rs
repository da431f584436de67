use clap::Parser;
use snipstash::cli::{Cli, Command, WebArgs};
use snipstash::config::{Config, DEFAULT_PORT};
use snipstash::prompts;
use snipstash::store::Store;
use snipstash::web;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Web(WebArgs::default()));

    let result = match command {
        Command::Web(args) => Config::resolve(args.port).and_then(|config| web::run(&config)),
        Command::Tui => run_tui(),
        Command::Add => run_add(),
        Command::List => run_list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(feature = "tui")]
fn run_tui() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::resolve(DEFAULT_PORT)?;
    snipstash::tui::run(&config)
}

#[cfg(not(feature = "tui"))]
fn run_tui() -> Result<(), Box<dyn std::error::Error>> {
    Err("this build has no terminal interface (the 'tui' feature is disabled)".into())
}

fn run_add() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::resolve(DEFAULT_PORT)?;
    let store = Store::open(&config.db_path)?;
    prompts::add(&store)
}

fn run_list() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::resolve(DEFAULT_PORT)?;
    let store = Store::open(&config.db_path)?;
    let snippets = store.list(None, None)?;

    if snippets.is_empty() {
        println!("No snippets found. Run 'snipstash add' to create one.");
        return Ok(());
    }

    println!("{:<5} {:<32} {:<12} {:<24}", "ID", "Title", "Language", "Updated");
    println!("{}", "-".repeat(75));

    for snippet in snippets {
        println!(
            "{:<5} {:<32} {:<12} {:<24}",
            snippet.id,
            truncate(&snippet.title, 30),
            truncate(&snippet.language, 10),
            snippet.updated_at
        );
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 2).collect();
        format!("{truncated}..")
    }
}
