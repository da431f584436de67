use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8018;

/// Name of the external clipboard helper invoked by the terminal interface.
/// Overridable with the SNIPSTASH_CLIPBOARD environment variable.
const DEFAULT_CLIPBOARD_HELPER: &str = "yank";

/// Resolved once at process start and passed into the adapters.
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
    pub clipboard_helper: String,
}

impl Config {
    pub fn resolve(port: u16) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            db_path: default_db_path()?,
            port,
            clipboard_helper: std::env::var("SNIPSTASH_CLIPBOARD")
                .unwrap_or_else(|_| DEFAULT_CLIPBOARD_HELPER.to_string()),
        })
    }
}

/// Get the database path (~/.local/share/snipstash/snippets.db or platform equivalent)
fn default_db_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data_dir = directories::ProjectDirs::from("", "", "snipstash")
        .ok_or("Could not determine data directory")?
        .data_dir()
        .to_path_buf();

    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("snippets.db"))
}
