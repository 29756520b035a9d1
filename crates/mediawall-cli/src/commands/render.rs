use super::{exit_code_for, json_pretty, spin_fail, spin_ok, spinner, Source, EXIT_SUCCESS};
use mediawall_core::{
    load, DocumentSurface, GalleryRenderer, Layout, LoadOutcome, RenderOptions, TextSurface,
};
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn run(
    source: &Source,
    out: Option<&Path>,
    page: Option<&Path>,
    target: Option<&str>,
    layout: Layout,
    lazy: bool,
    text: bool,
    json: bool,
) -> Result<u8, String> {
    if json && out.is_none() {
        return Err("--json requires --out so the document and the report don't mix".to_owned());
    }

    let renderer = GalleryRenderer::new(RenderOptions {
        layout,
        lazy_load: lazy,
    });

    let pb = (!json).then(|| spinner("fetching manifest..."));
    let (outcome, output) = if text {
        let mut surface = TextSurface::new();
        let outcome = load(|| source.entries(), &renderer, &mut surface);
        (outcome, surface.finish())
    } else {
        // Bind the attachment target before any fetch happens; a missing
        // target aborts the whole operation.
        let mut surface = match (page, target) {
            (Some(page), Some(target)) => {
                let shell = std::fs::read_to_string(page)
                    .map_err(|e| format!("failed to read {}: {e}", page.display()))?;
                DocumentSurface::bind(&shell, target, layout).map_err(|e| e.to_string())?
            }
            _ => DocumentSurface::standalone(layout),
        };
        let outcome = load(|| source.entries(), &renderer, &mut surface);
        (outcome, surface.finish())
    };

    if let Some(pb) = &pb {
        match &outcome.error {
            None => spin_ok(pb, &format!("{} item(s) rendered", outcome.rendered)),
            Some(e) => spin_fail(pb, e),
        }
    }

    match out {
        Some(path) => {
            std::fs::write(path, &output)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            if !json {
                println!("gallery written to {}", path.display());
            }
        }
        None => print!("{output}"),
    }

    if json {
        println!("{}", json_pretty(&outcome)?);
    }

    // The failure is contained in the document; the exit code still tells
    // scripts what happened.
    Ok(report_code(&outcome))
}

fn report_code(outcome: &LoadOutcome) -> u8 {
    match &outcome.error {
        None => EXIT_SUCCESS,
        Some(msg) => exit_code_for(msg),
    }
}
