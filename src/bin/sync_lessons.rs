// src/bin/sync_lessons.rs
//
// One-shot content sync: copies the canonical lessons manifest into the
// served static path so contentReady edits show up immediately.
//
// Usage: sync_lessons [source] [destination]

use std::env;
use std::fs;
use std::process::ExitCode;

const DEFAULT_SOURCE: &str = "data/maths/lessons.json";
const DEFAULT_DESTINATION: &str = "public/data/maths/lessons.json";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let source = args.get(1).map(String::as_str).unwrap_or(DEFAULT_SOURCE);
    let destination = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(DEFAULT_DESTINATION);

    match sync(source, destination) {
        Ok((ready, pending)) => {
            println!("Synced {source} -> {destination}");
            println!("Content status: {ready} ready, {pending} pending");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error syncing lessons manifest: {e}");
            ExitCode::FAILURE
        }
    }
}

fn sync(source: &str, destination: &str) -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let data = fs::read_to_string(source)?;

    // Validate before overwriting the served copy, and report readiness.
    let manifest: serde_json::Value = serde_json::from_str(&data)?;
    let lessons = manifest
        .get("lessons")
        .and_then(|l| l.as_array())
        .ok_or("manifest has no 'lessons' array")?;

    let ready = lessons
        .iter()
        .filter(|l| l.get("contentReady").and_then(|v| v.as_bool()).unwrap_or(false))
        .count();

    if let Some(parent) = std::path::Path::new(destination).parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, &data)?;

    Ok((ready, lessons.len() - ready))
}
