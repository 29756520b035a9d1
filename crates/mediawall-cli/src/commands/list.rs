use super::{json_pretty, spin_fail, spin_ok, spinner, Source, EXIT_SUCCESS};

pub fn run(source: &Source, json: bool) -> Result<u8, String> {
    let pb = (!json).then(|| spinner("fetching manifest..."));
    let entries = match source.entries() {
        Ok(entries) => {
            if let Some(pb) = &pb {
                spin_ok(pb, &format!("{} media item(s)", entries.len()));
            }
            entries
        }
        Err(e) => {
            if let Some(pb) = &pb {
                spin_fail(pb, &e.to_string());
            }
            return Err(e.to_string());
        }
    };

    if json {
        println!("{}", json_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("no media entries");
    } else {
        println!("{:<24} {:<12} {:>10} URL", "NAME", "RESOLUTION", "SIZE");
        let dim = console::Style::new().dim();
        for entry in &entries {
            let resolution = match entry.resolution.as_deref() {
                Some(r) => r.to_owned(),
                None => dim.apply_to("-").to_string(),
            };
            println!(
                "{:<24} {:<12} {:>10} {}",
                entry.name,
                resolution,
                entry.human_size(),
                entry.url
            );
        }
    }
    Ok(EXIT_SUCCESS)
}
