use crate::infra::InMemoryReportRepository;
use clap::Args;
use pdf_a11y::audit::{
    AnalysisFacts, AnalysisLevel, AuditReport, AuditService, AuditSubmission, ComplianceResult,
    DocumentDescriptor, VeraPdfChecker,
};
use pdf_a11y::config::AppConfig;
use pdf_a11y::error::AppError;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AuditArgs {
    /// JSON file with the extracted document facts
    #[arg(long)]
    pub(crate) facts: PathBuf,
    /// JSON file with a precomputed PDF/UA verdict
    #[arg(long, conflicts_with = "pdf")]
    pub(crate) compliance: Option<PathBuf>,
    /// PDF to validate with veraPDF when no verdict is supplied
    #[arg(long)]
    pub(crate) pdf: Option<PathBuf>,
    /// Analysis depth: quick, standard or professional
    #[arg(long, default_value_t = AnalysisLevel::Standard)]
    pub(crate) level: AnalysisLevel,
    /// Filename recorded in the report (defaults to the PDF or facts file name)
    #[arg(long)]
    pub(crate) filename: Option<String>,
    /// Print the full report as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LevelsArgs {
    /// Print the level configurations as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let AuditArgs {
        facts,
        compliance,
        pdf,
        level,
        filename,
        json,
    } = args;

    let facts: AnalysisFacts = read_json(&facts).await?;
    let compliance: Option<ComplianceResult> = match compliance {
        Some(path) => Some(read_json(&path).await?),
        None => None,
    };

    let file_size = match &pdf {
        Some(path) => tokio::fs::metadata(path).await?.len(),
        None => 0,
    };
    let filename = filename
        .or_else(|| pdf.as_deref().and_then(file_name))
        .unwrap_or_else(|| "document.pdf".to_string());

    let config = AppConfig::load()?;
    let service = AuditService::new(
        Arc::new(VeraPdfChecker::new(config.validator)),
        Arc::new(InMemoryReportRepository::default()),
    );

    let report = service
        .submit(AuditSubmission {
            document: DocumentDescriptor {
                filename,
                file_size,
                path: pdf,
                content_hash: None,
            },
            level,
            facts,
            metadata: None,
            compliance,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn run_levels(args: LevelsArgs) -> Result<(), AppError> {
    let levels: Vec<_> = AnalysisLevel::ordered()
        .into_iter()
        .map(AnalysisLevel::config)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&levels)?);
        return Ok(());
    }

    for config in levels {
        println!(
            "{} ({}): {}",
            config.name, config.level, config.description
        );
        println!(
            "  max file size {} MB | pages scanned: {}",
            config.max_file_size_mb,
            config
                .max_pages_to_scan
                .map(|pages| pages.to_string())
                .unwrap_or_else(|| "all".to_string())
        );
        for item in config.includes {
            println!("  - {item}");
        }
    }
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

pub(crate) fn render_report(report: &AuditReport) -> String {
    let mut out = String::new();
    let metadata = &report.metadata;

    writeln!(
        out,
        "Accessibility audit: {} ({} analysis)",
        metadata.filename, metadata.analysis_level
    )
    .expect("write report line");
    writeln!(
        out,
        "Report {} | analyzed {}",
        report.report_id,
        metadata.analysis_date.format("%Y-%m-%d %H:%M UTC")
    )
    .expect("write report line");

    if let Some(summary) = &report.quick_summary {
        writeln!(
            out,
            "Quick score: {}/100 | {}",
            summary.quick_score,
            if summary.accessible {
                "likely accessible"
            } else {
                "likely inaccessible"
            }
        )
        .expect("write report line");
    }

    if let Some(score) = &report.accessibility_score {
        writeln!(
            out,
            "Score: {}/{} ({}%) - {}",
            score.total_score,
            score.max_score,
            score.percentage,
            score.level_label()
        )
        .expect("write report line");
        for detail in &score.details {
            writeln!(
                out,
                "  - {}: {}/{}",
                detail.criterion, detail.points, detail.max
            )
            .expect("write criterion line");
        }
    }

    if let Some(validation) = &report.pdf_ua_validation {
        if validation.is_compliant {
            writeln!(out, "PDF/UA: compliant").expect("write report line");
        } else {
            writeln!(
                out,
                "PDF/UA: non-compliant, {} failed rule{} ({} listed)",
                validation.failed_rules_count,
                if validation.failed_rules_count == 1 { "" } else { "s" },
                validation.failed_rules.len()
            )
            .expect("write report line");
        }
    }

    if !report.recommendations.is_empty() {
        writeln!(out, "Recommendations:").expect("write report line");
        for recommendation in &report.recommendations {
            writeln!(
                out,
                "  [{}] {} ({})",
                recommendation.priority.label().to_ascii_uppercase(),
                recommendation.issue,
                recommendation.wcag_reference
            )
            .expect("write report line");
            writeln!(out, "      {}", recommendation.recommendation)
                .expect("write recommendation");
        }
    }

    out
}
