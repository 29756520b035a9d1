use super::{Source, EXIT_SUCCESS};

pub fn run(source: Source, json: bool) -> Result<u8, String> {
    if json {
        return Err("JSON output is not supported for 'tui'".to_owned());
    }
    let Some(fetcher) = source.into_fetcher() else {
        return Err("'tui' requires a remote manifest (--manifest-url)".to_owned());
    };
    mediawall_tui::run(fetcher)?;
    Ok(EXIT_SUCCESS)
}
