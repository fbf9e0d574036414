use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub filename: String,
    pub sha256: String,
    pub table_count: usize,
    pub target_column_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source: String,
    pub profile: String,
    pub document_count: usize,
    pub documents: Vec<DocumentEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentStatus {
    Succeeded,
    Failed,
    DryRun,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub source: String,
    pub destination: String,
    pub html_destination: Option<String>,
    pub sha256_before: Option<String>,
    pub sha256_after: Option<String>,
    pub status: DocumentStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatCounts {
    pub documents_found: usize,
    pub documents_succeeded: usize,
    pub documents_failed: usize,
    pub tables_rewritten: usize,
    pub rows_rewritten: usize,
    pub target_cells_rewritten: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub updated_at: String,
    pub status: String,
    pub profile: String,
    pub source: String,
    pub counts: FormatCounts,
    pub documents: Vec<DocumentOutcome>,
}
