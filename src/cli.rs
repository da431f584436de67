use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "snipstash")]
#[command(about = "A personal snippet and notes manager")]
#[command(version)]
pub struct Cli {
    /// Defaults to `web` when no subcommand is given
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the web UI and JSON API
    Web(WebArgs),

    /// Browse snippets in a full-screen terminal interface
    Tui,

    /// Add a snippet through line prompts
    Add,

    /// List all snippets
    List,
}

#[derive(Parser)]
pub struct WebArgs {
    /// Port to listen on (all interfaces)
    #[arg(long, default_value_t = crate::config::DEFAULT_PORT)]
    pub port: u16,
}

impl Default for WebArgs {
    fn default() -> Self {
        WebArgs {
            port: crate::config::DEFAULT_PORT,
        }
    }
}
