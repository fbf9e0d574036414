use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::InventoryArgs;
use crate::config::FormatterConfig;
use crate::discovery::discover_documents;
use crate::model::{DocumentEntry, DocumentInventoryManifest};
use crate::table::TableRewriter;
use crate::util::{now_utc_string, read_document, sha256_file, write_json_pretty};

pub fn run(args: InventoryArgs) -> Result<()> {
    let config = FormatterConfig::resolve(&args.profile)?;
    let rewriter = TableRewriter::new(&config)?;
    let mut manifest = build_manifest(&args.input, &rewriter)?;
    manifest.profile = args.profile.label();

    for entry in &manifest.documents {
        info!(
            document = %entry.filename,
            tables = entry.table_count,
            target_columns = entry.target_column_count,
            "inventoried document"
        );
    }

    match &args.manifest_path {
        Some(manifest_path) => {
            write_json_pretty(manifest_path, &manifest)?;
            info!(path = %manifest_path.display(), "wrote inventory manifest");
        }
        None => info!(
            documents = manifest.document_count,
            source = %manifest.source,
            "inventory dry-run complete"
        ),
    }

    Ok(())
}

pub fn build_manifest(input: &Path, rewriter: &TableRewriter) -> Result<DocumentInventoryManifest> {
    let paths = discover_documents(input)?;

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        match inventory_entry(&path, rewriter) {
            Ok(entry) => documents.push(entry),
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "skipping unreadable document");
            }
        }
    }

    Ok(DocumentInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source: input.display().to_string(),
        profile: String::new(),
        document_count: documents.len(),
        documents,
    })
}

fn inventory_entry(path: &Path, rewriter: &TableRewriter) -> Result<DocumentEntry> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(ToOwned::to_owned)
        .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;
    let sha256 = sha256_file(path)?;
    let survey = rewriter.survey(&read_document(path)?);

    Ok(DocumentEntry {
        filename,
        sha256,
        table_count: survey.tables,
        target_column_count: survey.target_columns,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::build_manifest;
    use crate::cli::Profile;
    use crate::config::FormatterConfig;
    use crate::table::TableRewriter;

    #[test]
    fn build_manifest_counts_tables_and_skips_unreadable_documents() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        fs::write(
            dir.path().join("audit.md"),
            "| 检查项 | 标准要求 | 备注 |\n|---|---|---|\n| a | b | c |\n\n| x |\n|---|\n",
        )
        .expect("write audit");
        fs::write(dir.path().join("broken.md"), [0xff_u8, 0xfe]).expect("write broken");

        let rewriter = TableRewriter::new(&FormatterConfig::for_profile(Profile::Government))
            .expect("rewriter should build");
        let manifest = build_manifest(dir.path(), &rewriter).expect("manifest should build");

        assert_eq!(manifest.document_count, 1);
        let entry = &manifest.documents[0];
        assert_eq!(entry.filename, "audit.md");
        assert_eq!(entry.table_count, 2);
        assert_eq!(entry.target_column_count, 2);
        assert_eq!(entry.sha256.len(), 64);
    }
}
