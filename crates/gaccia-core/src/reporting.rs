//! Report artifacts for a finished competition.
//!
//! A run directory holds:
//! - `evaluation_report.json`: [`EvaluationReportArtifact`], pretty JSON
//! - `evaluation_summary.txt`: the composed summary text
//! - `evaluation_report.md`: markdown report
//! - `snark.md`: both commentary strings
//!
//! Every file is written to a temp file in the target directory and then
//! renamed into place, so readers never observe a partial artifact.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::domain::{CompetitiveEvaluation, DetailedEvaluation, Language, ReportError, Winner};
use crate::metrics::{Counter, METRICS};
use crate::obs;

pub const REPORT_JSON: &str = "evaluation_report.json";
pub const SUMMARY_TXT: &str = "evaluation_summary.txt";
pub const REPORT_MD: &str = "evaluation_report.md";
pub const SNARK_MD: &str = "snark.md";

/// Version of the JSON artifact layout.
pub const SCHEMA_VERSION: &str = "1.0";

/// Headline section of the persisted report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSummarySection {
    pub python_total_score: f64,
    pub typescript_total_score: f64,
    pub winner: Winner,
    pub python_snark: String,
    pub typescript_snark: String,
}

/// Canonical evaluation artifact written as `evaluation_report.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationReportArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub run_id: Uuid,
    /// SHA-256 of the evaluation's canonical JSON.
    pub evaluation_digest: String,
    pub summary: ReportSummarySection,
    pub python_evaluations: Vec<DetailedEvaluation>,
    pub typescript_evaluations: Vec<DetailedEvaluation>,
}

impl EvaluationReportArtifact {
    pub fn from_evaluation(
        evaluation: &CompetitiveEvaluation,
        run_id: Uuid,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at,
            run_id,
            evaluation_digest: evaluation_digest(evaluation)?,
            summary: ReportSummarySection {
                python_total_score: evaluation.python_total_score(),
                typescript_total_score: evaluation.typescript_total_score(),
                winner: evaluation.winner(),
                python_snark: evaluation.python_snark().to_string(),
                typescript_snark: evaluation.typescript_snark().to_string(),
            },
            python_evaluations: evaluation.python_evaluations().to_vec(),
            typescript_evaluations: evaluation.typescript_evaluations().to_vec(),
        })
    }

    pub fn evaluations(&self, language: Language) -> &[DetailedEvaluation] {
        match language {
            Language::Python => &self.python_evaluations,
            Language::TypeScript => &self.typescript_evaluations,
        }
    }

    pub fn total_score(&self, language: Language) -> f64 {
        match language {
            Language::Python => self.summary.python_total_score,
            Language::TypeScript => self.summary.typescript_total_score,
        }
    }
}

/// Hex SHA-256 over the evaluation's JSON encoding.
///
/// Equal evaluations always hash equal; field order is fixed by the type.
pub fn evaluation_digest(evaluation: &CompetitiveEvaluation) -> Result<String, ReportError> {
    let bytes = serde_json::to_vec(evaluation)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Paths of the artifacts written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub dir: PathBuf,
    pub json: PathBuf,
    pub summary: PathBuf,
    pub markdown: PathBuf,
    pub snark: PathBuf,
}

impl ReportPaths {
    fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            json: dir.join(REPORT_JSON),
            summary: dir.join(SUMMARY_TXT),
            markdown: dir.join(REPORT_MD),
            snark: dir.join(SNARK_MD),
        }
    }

    pub fn files(&self) -> [&Path; 4] {
        [&self.json, &self.summary, &self.markdown, &self.snark]
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ReportError + '_ {
    move |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Temp file in `dir` created with the mode a plain `File::create` gets
/// (0o666 minus the umask) rather than tempfile's owner-only default.
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Write `contents` to `path` via a sibling temp file and rename.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ReportError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = temp_file_in(dir).map_err(io_error(path))?;
    tmp.write_all(contents).map_err(io_error(path))?;
    tmp.flush().map_err(io_error(path))?;
    tmp.persist(path).map_err(|e| ReportError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Persist every report artifact for `evaluation` into `dir`.
///
/// The directory is created if absent. Writing the same evaluation twice
/// replaces the files wholesale.
pub fn save_evaluation_report(
    evaluation: &CompetitiveEvaluation,
    dir: &Path,
    run_id: Uuid,
) -> Result<ReportPaths, ReportError> {
    std::fs::create_dir_all(dir).map_err(io_error(dir))?;

    let artifact = EvaluationReportArtifact::from_evaluation(evaluation, run_id, Utc::now())?;
    let paths = ReportPaths::in_dir(dir);

    write_atomic(&paths.json, serde_json::to_string_pretty(&artifact)?.as_bytes())?;
    write_atomic(&paths.summary, evaluation.summary().as_bytes())?;
    write_atomic(&paths.markdown, render_report_md(&artifact).as_bytes())?;
    write_atomic(&paths.snark, render_snark_md(evaluation).as_bytes())?;

    METRICS.inc(Counter::ReportsWritten);
    obs::emit_report_written(dir, paths.files().len());
    Ok(paths)
}

/// Load `evaluation_report.json` back.
pub fn read_evaluation_report(path: &Path) -> Result<EvaluationReportArtifact, ReportError> {
    let raw = std::fs::read(path).map_err(io_error(path))?;
    Ok(serde_json::from_slice(&raw)?)
}

fn score_table(out: &mut String, evaluations: &[DetailedEvaluation]) {
    out.push_str("| Dimension | Score |\n|---|---|\n");
    for e in evaluations {
        out.push_str(&format!("| {} | {:.1} |\n", e.dimension, e.score));
    }
}

/// Render `evaluation_report.md`.
pub fn render_report_md(artifact: &EvaluationReportArtifact) -> String {
    let s = &artifact.summary;
    let mut out = String::new();
    out.push_str("# GACCIA Evaluation Report\n\n");
    out.push_str(&format!("**Run ID:** `{}`  \n", artifact.run_id));
    out.push_str(&format!(
        "**Date:** {}  \n\n",
        artifact.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str("## 🏆 Final Results\n\n");
    out.push_str(&format!("**Winner:** {}  \n**Final Scores:**\n", s.winner));
    out.push_str(&format!("- 🐍 Python: {:.1}/10\n", s.python_total_score));
    out.push_str(&format!("- 📘 TypeScript: {:.1}/10\n\n", s.typescript_total_score));

    out.push_str("## 💬 Competitive Snark\n\n");
    out.push_str(&format!("**🐍 Python's take:** {}  \n", s.python_snark));
    out.push_str(&format!("**📘 TypeScript's take:** {}\n\n", s.typescript_snark));

    out.push_str("## 📊 Detailed Scores\n");
    for lang in Language::ALL {
        out.push_str(&format!("\n### {} Evaluation\n\n", lang.display_name()));
        score_table(&mut out, artifact.evaluations(lang));
    }
    out
}

/// Render `snark.md`.
pub fn render_snark_md(evaluation: &CompetitiveEvaluation) -> String {
    format!(
        "**🐍 Python's take:** {}\n\n**📘 TypeScript's take:** {}\n",
        evaluation.python_snark(),
        evaluation.typescript_snark()
    )
}

/// Console breakdown printed after a run: per-dimension scores, strengths
/// and weaknesses for each language, then the summary.
pub fn render_detailed_results(evaluation: &CompetitiveEvaluation) -> String {
    let rule = "=".repeat(80);
    let mut out = format!("\n{rule}\n📊 DETAILED EVALUATION RESULTS\n{rule}\n");
    for lang in Language::ALL {
        out.push_str(&format!(
            "\n{} {} EVALUATION (Total: {:.1}/10)\n{}\n",
            lang.badge(),
            lang.display_name().to_uppercase(),
            evaluation.total_score(lang),
            "-".repeat(50)
        ));
        for e in evaluation.evaluations(lang) {
            out.push_str(&format!("\n{}: {:.1}/10\n", e.dimension, e.score));
            out.push_str(&format!("✅ Strengths: {}\n", e.strengths.join(", ")));
            out.push_str(&format!("❌ Weaknesses: {}\n", e.weaknesses.join(", ")));
        }
    }
    out.push('\n');
    out.push_str(evaluation.summary());
    out
}

/// Compact view of a persisted report (used by `gaccia show`).
pub fn render_artifact_overview(artifact: &EvaluationReportArtifact) -> String {
    let s = &artifact.summary;
    let mut out = format!(
        "Run {} ({})\nSchema {} digest {}\n\nWinner: {}\nPython: {:.1}/10\nTypeScript: {:.1}/10\n",
        artifact.run_id,
        artifact.generated_at.to_rfc3339(),
        artifact.schema_version,
        artifact.evaluation_digest,
        s.winner,
        s.python_total_score,
        s.typescript_total_score,
    );
    for lang in Language::ALL {
        out.push_str(&format!("\n{} {}\n", lang.badge(), lang.display_name()));
        for e in artifact.evaluations(lang) {
            out.push_str(&format!("  {:<28} {:>4.1}\n", e.dimension.label(), e.score));
        }
    }
    out.push_str(&format!(
        "\n🐍 Python's take: {}\n📘 TypeScript's take: {}\n",
        s.python_snark, s.typescript_snark
    ));
    out
}
