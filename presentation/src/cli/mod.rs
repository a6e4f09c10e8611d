//! CLI argument surface.

use clap::Parser;
use std::path::PathBuf;

use rivalscope_domain::AnalysisInput;

/// Competitive-intelligence research pipeline.
///
/// Profiles the target company, discovers competitors, deep-dives each one,
/// and synthesizes a strategic report, streaming progress as it goes.
#[derive(Parser, Debug)]
#[command(name = "rivalscope", version, about)]
pub struct Cli {
    /// Target company domain, e.g. "acme.com"
    #[arg(long)]
    pub domain: String,

    /// GICS sector of the target
    #[arg(long)]
    pub industry: String,

    /// GICS sub-industry of the target
    #[arg(long = "sub-industry")]
    pub sub_industry: String,

    /// Target headquarters ("City, Country")
    #[arg(long)]
    pub hq: Option<String>,

    /// Target geography; repeat for multiple regions
    #[arg(long = "geography")]
    pub geography: Vec<String>,

    /// Comma-separated competitors already known to the caller
    #[arg(long = "known-competitors")]
    pub known_competitors: Option<String>,

    /// Emit raw SSE frames on stdout instead of console narration
    #[arg(long)]
    pub raw: bool,

    /// Explicit config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip all config files and use built-in defaults
    #[arg(long)]
    pub no_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the pipeline input from the parsed arguments.
    pub fn to_input(&self) -> AnalysisInput {
        let mut input = AnalysisInput::new(&self.domain, &self.industry, &self.sub_industry);
        if let Some(hq) = &self.hq {
            input = input.with_hq(hq);
        }
        if !self.geography.is_empty() {
            input = input.with_target_geography(self.geography.clone());
        }
        if let Some(known) = &self.known_competitors {
            input = input.with_known_competitors(known);
        }
        input
    }
}
