//! Line-oriented snippet flows.
//!
//! These run in normal terminal mode: the full-screen interface suspends
//! itself before calling into them and resumes afterwards, and the `add`
//! subcommand runs the add flow directly. Each flow is a synchronous
//! function that prompts, performs at most one store mutation, and returns.

use std::io::{self, BufRead, Write};

use crate::clipboard;
use crate::store::{SnippetDraft, Store};

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Read lines until end of input (Ctrl+D on a terminal).
fn read_multiline() -> io::Result<String> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        lines.push(line?);
    }
    Ok(lines.join("\n"))
}

fn pause() {
    let _ = prompt("Press Enter to continue...");
}

fn preview(content: &str) -> String {
    content.chars().take(200).collect()
}

pub fn add(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    println!("\nAdd a new snippet");
    println!("{}", "-".repeat(40));

    let title = prompt("Title: ")?;
    if title.is_empty() {
        println!("Title cannot be empty.");
        pause();
        return Ok(());
    }

    let language = prompt("Language (optional): ")?;
    let tags = prompt("Tags (comma-separated, optional): ")?;

    println!("\nContent (Ctrl+D when done):");
    println!("{}", "-".repeat(40));
    let content = read_multiline()?;

    if content.trim().is_empty() {
        println!("\nContent cannot be empty, snippet not saved.");
        pause();
        return Ok(());
    }

    let id = store.create(&SnippetDraft {
        title,
        content,
        language,
        tags,
    })?;

    println!("\nCreated snippet #{id}.");
    pause();
    Ok(())
}

pub fn edit(store: &Store, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let Some(snippet) = store.get(id)? else {
        println!("Snippet #{id} not found.");
        pause();
        return Ok(());
    };

    println!("\nEdit snippet #{id}");
    println!("{}", "-".repeat(40));

    // empty input keeps the current value
    println!("Current title: {}", snippet.title);
    let title = prompt("New title (Enter to keep): ")?;
    let title = if title.is_empty() { snippet.title } else { title };

    println!("Current language: {}", snippet.language);
    let language = prompt("New language (Enter to keep): ")?;
    let language = if language.is_empty() {
        snippet.language
    } else {
        language
    };

    println!("Current tags: {}", snippet.tags);
    let tags = prompt("New tags (Enter to keep): ")?;
    let tags = if tags.is_empty() { snippet.tags } else { tags };

    println!("\nCurrent content:");
    println!("{}", "-".repeat(40));
    println!("{}", preview(&snippet.content));
    println!("{}", "-".repeat(40));

    let content = if prompt("Replace content? (y/N): ")?.eq_ignore_ascii_case("y") {
        println!("\nNew content (Ctrl+D when done):");
        println!("{}", "-".repeat(40));
        let replacement = read_multiline()?;
        if replacement.trim().is_empty() {
            snippet.content
        } else {
            replacement
        }
    } else {
        snippet.content
    };

    store.update(
        id,
        &SnippetDraft {
            title,
            content,
            language,
            tags,
        },
    )?;

    println!("\nUpdated snippet #{id}.");
    pause();
    Ok(())
}

pub fn delete(store: &Store, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let Some(snippet) = store.get(id)? else {
        println!("Snippet #{id} not found.");
        pause();
        return Ok(());
    };

    println!("\nDelete snippet #{id}");
    println!("{}", "-".repeat(40));
    println!("Title:    {}", snippet.title);
    println!("Language: {}", snippet.language);
    println!("Tags:     {}", snippet.tags);
    println!("\nContent preview:");
    println!("{}", "-".repeat(40));
    println!("{}", preview(&snippet.content));
    println!("{}", "-".repeat(40));

    if prompt("\nDelete this snippet? (y/N): ")?.eq_ignore_ascii_case("y") {
        store.delete(id)?;
        println!("\nDeleted snippet #{id}.");
    } else {
        println!("\nDeletion cancelled.");
    }

    pause();
    Ok(())
}

pub fn view(store: &Store, id: i64, clipboard_helper: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(snippet) = store.get(id)? else {
        println!("Snippet #{id} not found.");
        pause();
        return Ok(());
    };

    println!("\nSnippet #{id}");
    println!("{}", "-".repeat(60));
    println!("Title:    {}", snippet.title);
    println!("Language: {}", snippet.language);
    println!("Tags:     {}", snippet.tags);
    println!("Created:  {}", snippet.created_at);
    println!("Updated:  {}", snippet.updated_at);
    println!("\nContent:");
    println!("{}", "-".repeat(60));
    println!("{}", snippet.content);
    println!("{}", "-".repeat(60));

    let action = prompt("\n[y] copy to clipboard  [Enter] back: ")?;
    if action.eq_ignore_ascii_case("y") {
        match clipboard::copy(clipboard_helper, &snippet.content) {
            Ok(()) => println!("Copied to clipboard."),
            Err(e) => println!("{e}"),
        }
        pause();
    }

    Ok(())
}
