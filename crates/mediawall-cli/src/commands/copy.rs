use super::{json_pretty, Source, EXIT_SUCCESS};
use mediawall_core::desktop_notifier;
use mediawall_schema::MediaEntry;

pub fn run(source: &Source, selector: &str, json: bool) -> Result<u8, String> {
    let entries = source.entries().map_err(|e| e.to_string())?;
    let entry = select(&entries, selector)?;

    let mut notifier = desktop_notifier().map_err(|e| e.to_string())?;
    notifier.copy(&entry.url).map_err(|e| e.to_string())?;

    if json {
        println!(
            "{}",
            json_pretty(&serde_json::json!({ "copied": entry.url }))?
        );
    } else {
        println!("copied {}", entry.url);
    }
    Ok(EXIT_SUCCESS)
}

/// Resolve a zero-based index or a unique name/filename to one entry.
fn select<'a>(entries: &'a [MediaEntry], selector: &str) -> Result<&'a MediaEntry, String> {
    if let Ok(index) = selector.parse::<usize>() {
        return entries
            .get(index)
            .ok_or_else(|| format!("index {index} out of range ({} entries)", entries.len()));
    }
    let matches: Vec<&MediaEntry> = entries
        .iter()
        .filter(|e| e.name == selector || e.filename == selector)
        .collect();
    match matches.len() {
        0 => Err(format!("no entry matching '{selector}'")),
        1 => Ok(matches[0]),
        n => Err(format!("ambiguous selector '{selector}': matches {n} entries")),
    }
}
