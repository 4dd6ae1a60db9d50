//! One-shot analysis from the command line

use crate::server::{build_pipeline, load_config};
use anyhow::{Context, Result};
use clap::Args;
use leadscout_core::{AnalysisRequest, Report, UserFriendlyError};
use std::path::{Path, PathBuf};

/// Leads printed in the summary
const TOP_LEADS: usize = 5;

/// Arguments for `leadscout analyze`
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Event page URL
    pub event_url: String,

    /// Your company's website
    #[arg(long)]
    pub company_url: String,

    /// Your company's name
    #[arg(long)]
    pub company_name: Option<String>,

    /// Event name, used in discovery queries
    #[arg(long)]
    pub event_name: Option<String>,

    /// Write the full report as JSON
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl AnalyzeArgs {
    fn request(&self) -> AnalysisRequest {
        AnalysisRequest {
            event_url: self.event_url.clone(),
            event_name: self.event_name.clone(),
            company_url: self.company_url.clone(),
            company_name: self.company_name.clone(),
        }
    }
}

pub async fn run(args: AnalyzeArgs) -> Result<()> {
    let config = load_config()?;

    let pipeline = match build_pipeline(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            if let Some(hint) = e.suggestion() {
                eprintln!("   {hint}");
            }
            return Err(e.into());
        }
    };

    println!("🔍 Analyzing {} ...", args.event_url);
    let report = match pipeline.run(&args.request()).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            if let Some(hint) = e.suggestion() {
                eprintln!("   {hint}");
            }
            return Err(e.into());
        }
    };

    print!("{}", render_summary(&report));

    if let Some(path) = &args.output {
        write_report(&report, path)?;
        println!("\n💾 Report saved to {}", path.display());
    }

    Ok(())
}

/// Write the report as pretty JSON, creating parent directories
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Human-readable summary: counters, top leads, assessment, recommendations
pub fn render_summary(report: &Report) -> String {
    let meta = &report.metadata;
    let matches = &report.step4_matches;
    let summary = &matches.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "\n📊 Leads for {} at {}\n",
        meta.company_name, meta.event_url
    ));
    out.push_str(&format!(
        "   Attendees: {} discovered ({}), {} analyzed\n",
        meta.attendees_discovered,
        meta.attendee_provenance.as_str(),
        summary.total_attendees_analyzed
    ));
    out.push_str(&format!(
        "   Perfect: {}  Good: {}  Moderate: {}  Poor: {}\n",
        summary.perfect_matches,
        summary.good_matches,
        summary.moderate_matches,
        summary.poor_matches
    ));

    if !matches.attendees.is_empty() {
        out.push_str(&format!("\n🎯 Top {} leads\n", TOP_LEADS.min(matches.attendees.len())));
        for (rank, lead) in matches.attendees.iter().take(TOP_LEADS).enumerate() {
            let value = lead
                .business_value_score
                .map_or_else(|| "-".to_string(), |v| v.to_string());
            out.push_str(&format!(
                "   {}. {} ({}, {}) ICP {} / Value {} [{}]\n",
                rank + 1,
                lead.name,
                lead.role,
                lead.company,
                lead.icp_match_score,
                value,
                lead.opportunity_type.as_str()
            ));
            if !lead.recommended_action.is_empty() {
                out.push_str(&format!("      → {}\n", lead.recommended_action));
            }
        }
    }

    if !matches.overall_event_assessment.is_empty() {
        out.push_str(&format!("\n📝 {}\n", matches.overall_event_assessment));
    }
    for recommendation in &matches.recommendations {
        out.push_str(&format!("   • {recommendation}\n"));
    }

    out
}
