use clap::{Parser, Subcommand, Args, ValueEnum};
use crate::models::{Confidence, Risk};

#[derive(Parser)]
#[command(
    name = "alertscope",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIMESTAMP"), ")"),
    about = "Filter scan alerts by scope and severity and prepare report payloads"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter the session's alerts and generate a report
    Generate(GenerateArgs),
    /// List the available report templates
    Templates(TemplatesArgs),
    /// Validate a report settings file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// Session export (JSON) with contexts, site tree and alert tree
    #[arg(short, long)]
    pub session: String,

    /// YAML settings file; defaults to the settings saved in the database
    #[arg(long)]
    pub settings: Option<String>,

    /// SQLite database holding saved settings
    #[arg(long, default_value = "./data/alertscope.db")]
    pub db: String,

    /// Report title
    #[arg(long)]
    pub title: Option<String>,

    /// Report description
    #[arg(long)]
    pub description: Option<String>,

    /// Template display name or config name
    #[arg(short, long)]
    pub template: Option<String>,

    /// Directory containing report templates
    #[arg(long)]
    pub template_dir: Option<String>,

    /// Directory the report is written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Explicit report file name, overriding the name pattern
    #[arg(long)]
    pub name: Option<String>,

    /// Report name pattern, e.g. "{{yyyy-MM-dd}}-{site}"
    #[arg(long)]
    pub name_pattern: Option<String>,

    /// Site to include (repeatable; none means all sites)
    #[arg(long = "site")]
    pub sites: Vec<String>,

    /// Context to record in the report (repeatable)
    #[arg(long = "context")]
    pub contexts: Vec<String>,

    /// Site the name pattern is expanded against (defaults to the last --site)
    #[arg(long)]
    pub focus_site: Option<String>,

    /// Risk level to include (repeatable; overrides saved settings)
    #[arg(long = "risk", value_enum)]
    pub risks: Vec<RiskArg>,

    /// Confidence level to include (repeatable; overrides saved settings)
    #[arg(long = "confidence", value_enum)]
    pub confidences: Vec<ConfidenceArg>,

    /// Generate even when no alerts match
    #[arg(long)]
    pub generate_anyway: bool,

    /// Mark the report for display after generation
    #[arg(long, conflicts_with = "no_display")]
    pub display: bool,

    /// Do not mark the report for display, overriding saved settings
    #[arg(long)]
    pub no_display: bool,
}

#[derive(Args, Clone)]
pub struct TemplatesArgs {
    /// Directory containing report templates
    #[arg(long, default_value = "templates")]
    pub template_dir: String,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Settings file to validate
    pub settings: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RiskArg {
    Informational,
    Low,
    Medium,
    High,
}

impl From<RiskArg> for Risk {
    fn from(arg: RiskArg) -> Self {
        match arg {
            RiskArg::Informational => Risk::Informational,
            RiskArg::Low => Risk::Low,
            RiskArg::Medium => Risk::Medium,
            RiskArg::High => Risk::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfidenceArg {
    FalsePositive,
    Low,
    Medium,
    High,
    Confirmed,
}

impl From<ConfidenceArg> for Confidence {
    fn from(arg: ConfidenceArg) -> Self {
        match arg {
            ConfidenceArg::FalsePositive => Confidence::FalsePositive,
            ConfidenceArg::Low => Confidence::Low,
            ConfidenceArg::Medium => Confidence::Medium,
            ConfidenceArg::High => Confidence::High,
            ConfidenceArg::Confirmed => Confidence::Confirmed,
        }
    }
}
