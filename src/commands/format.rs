use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info};

use crate::cli::FormatArgs;
use crate::config::FormatterConfig;
use crate::discovery::discover_documents;
use crate::model::{DocumentOutcome, DocumentStatus, FormatCounts, FormatRunManifest};
use crate::table::{HtmlRenderer, RewriteStats, TableRewriter};
use crate::util::{
    document_title, now_utc_string, read_document, sha256_file, utc_compact_string,
    write_document, write_json_pretty,
};

pub fn run(args: FormatArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let config = FormatterConfig::resolve(&args.profile)?;
    let rewriter = TableRewriter::new(&config)?;
    let renderer = if args.html {
        Some(HtmlRenderer::new()?)
    } else {
        None
    };

    let documents = discover_documents(&args.input)?;
    info!(
        source = %args.input.display(),
        documents = documents.len(),
        run_id = %run_id,
        "starting format run"
    );

    let mut counts = FormatCounts {
        documents_found: documents.len(),
        ..FormatCounts::default()
    };
    let mut outcomes = Vec::<DocumentOutcome>::with_capacity(documents.len());

    for source in &documents {
        let destination = resolve_destination(args.output.as_deref(), source, documents.len());

        match format_document(source, &destination, &rewriter, renderer.as_ref(), &args) {
            Ok((outcome, stats)) => {
                counts.documents_succeeded += 1;
                counts.tables_rewritten += stats.tables;
                counts.rows_rewritten += stats.rows;
                counts.target_cells_rewritten += stats.target_cells;
                outcomes.push(outcome);
            }
            Err(err) => {
                error!(path = %source.display(), error = %format!("{err:#}"), "failed to format document");
                counts.documents_failed += 1;
                outcomes.push(DocumentOutcome {
                    source: source.display().to_string(),
                    destination: destination.display().to_string(),
                    html_destination: None,
                    sha256_before: None,
                    sha256_after: None,
                    status: DocumentStatus::Failed,
                    error: Some(format!("{err:#}")),
                });
            }
        }
    }

    info!(
        succeeded = counts.documents_succeeded,
        failed = counts.documents_failed,
        total = counts.documents_found,
        "format run completed"
    );

    if let Some(report_path) = &args.report_path {
        let status = if counts.documents_failed == 0 {
            "completed"
        } else {
            "completed_with_failures"
        };
        let manifest = FormatRunManifest {
            manifest_version: 1,
            run_id,
            started_at,
            updated_at: now_utc_string(),
            status: status.to_string(),
            profile: args.profile.label(),
            source: args.input.display().to_string(),
            counts,
            documents: outcomes,
        };
        write_json_pretty(report_path, &manifest)?;
        info!(path = %report_path.display(), "wrote format run report");
    }

    Ok(())
}

fn format_document(
    source: &Path,
    destination: &Path,
    rewriter: &TableRewriter,
    renderer: Option<&HtmlRenderer>,
    args: &FormatArgs,
) -> Result<(DocumentOutcome, RewriteStats)> {
    let sha256_before = sha256_file(source)?;
    let mut text = read_document(source)?;
    if args.repair_emphasis {
        text = rewriter.repair_emphasis(&text);
    }

    let output = rewriter.rewrite(&text);
    let mut outcome = DocumentOutcome {
        source: source.display().to_string(),
        destination: destination.display().to_string(),
        html_destination: None,
        sha256_before: Some(sha256_before),
        sha256_after: None,
        status: DocumentStatus::DryRun,
        error: None,
    };

    if args.dry_run {
        info!(
            path = %source.display(),
            tables = output.stats.tables,
            rows = output.stats.rows,
            "dry-run: markdown not written"
        );
        return Ok((outcome, output.stats));
    }

    write_document(destination, &output.text)?;
    info!(
        path = %destination.display(),
        tables = output.stats.tables,
        rows = output.stats.rows,
        "saved markdown"
    );

    if let Some(renderer) = renderer {
        let html_path = destination.with_extension("html");
        let html = renderer.render(&output.text, &document_title(destination));
        write_document(&html_path, &html)?;
        info!(path = %html_path.display(), "generated html");
        outcome.html_destination = Some(html_path.display().to_string());
    }

    outcome.sha256_after = Some(sha256_file(destination)?);
    outcome.status = DocumentStatus::Succeeded;
    Ok((outcome, output.stats))
}

pub fn resolve_destination(output: Option<&Path>, source: &Path, document_count: usize) -> PathBuf {
    let Some(output) = output else {
        return source.to_path_buf();
    };

    if !output.is_dir() && document_count == 1 {
        return output.to_path_buf();
    }

    match source.file_name() {
        Some(name) => output.join(name),
        None => output.to_path_buf(),
    }
}
