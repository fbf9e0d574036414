use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "audit-tables",
    version,
    about = "Normalize compliance-audit tables in markdown documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite markdown tables in place or into an output location.
    Format(FormatArgs),
    /// Render already formatted markdown tables to HTML.
    Render(RenderArgs),
    /// List the documents a format run would touch.
    Inventory(InventoryArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Profile {
    Internet,
    Government,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internet => "internet",
            Self::Government => "government",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long, value_enum, default_value_t = Profile::Internet)]
    pub profile: Profile,

    /// JSON file with `target_headers` and `emphasis_keywords`; overrides --profile.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ProfileArgs {
    pub fn label(&self) -> String {
        match &self.config {
            Some(path) => format!("config:{}", path.display()),
            None => self.profile.as_str().to_string(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    #[arg(default_value = ".")]
    pub input: PathBuf,

    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub profile: ProfileArgs,

    #[arg(long, default_value_t = false)]
    pub html: bool,

    #[arg(long, default_value_t = false)]
    pub repair_emphasis: bool,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(default_value = ".")]
    pub input: PathBuf,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(default_value = ".")]
    pub input: PathBuf,

    #[command(flatten)]
    pub profile: ProfileArgs,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}
