use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{error, info};

use crate::cli::RenderArgs;
use crate::discovery::discover_documents;
use crate::table::HtmlRenderer;
use crate::util::{document_title, read_document, write_document};

pub fn run(args: RenderArgs) -> Result<()> {
    let renderer = HtmlRenderer::new()?;
    let documents = discover_documents(&args.input)?;

    let mut succeeded = 0_usize;
    for source in &documents {
        let destination = html_destination(args.output_dir.as_deref(), source);
        match render_document(&renderer, source, &destination) {
            Ok(()) => {
                succeeded += 1;
                info!(path = %destination.display(), "generated html");
            }
            Err(err) => {
                error!(path = %source.display(), error = %format!("{err:#}"), "failed to render document");
            }
        }
    }

    info!(
        succeeded,
        failed = documents.len() - succeeded,
        total = documents.len(),
        "render run completed"
    );

    Ok(())
}

fn render_document(renderer: &HtmlRenderer, source: &Path, destination: &Path) -> Result<()> {
    let markdown = read_document(source)?;
    let html = renderer.render(&markdown, &document_title(source));
    write_document(destination, &html)
}

fn html_destination(output_dir: Option<&Path>, source: &Path) -> PathBuf {
    let html_path = source.with_extension("html");
    match (output_dir, html_path.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => html_path,
    }
}
