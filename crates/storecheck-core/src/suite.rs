//! Named cases, grouped into suites, run one after another.

use crate::browser::{Browser, BrowserError};
use crate::config::StorecheckConfig;
use crate::expect::ExpectationFailure;
use crate::resolution::ResolutionError;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Expectation(#[from] ExpectationFailure),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CheckError {
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::Expectation(_) => "EXPECTATION_FAILED",
            CheckError::Resolution(e) => e.code(),
            CheckError::Browser(e) => e.code(),
            CheckError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// What a case reports when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// The feature under test is absent and the case tolerates that.
    Skipped(String),
}

#[async_trait]
pub trait Case: Send + Sync {
    fn suite(&self) -> &'static str;

    fn name(&self) -> &'static str;

    /// Runs before every case; a failure here fails the case.
    async fn prepare(
        &self,
        _browser: &mut dyn Browser,
        _config: &StorecheckConfig,
    ) -> Result<(), CheckError> {
        Ok(())
    }

    async fn run(
        &self,
        browser: &mut dyn Browser,
        config: &StorecheckConfig,
    ) -> Result<Outcome, CheckError>;

    fn title(&self) -> String {
        format!("{} > {}", self.suite(), self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Skipped { reason: String },
    Failed { code: String, reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub suite: String,
    pub name: String,
    #[serde(flatten)]
    pub status: CaseStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub results: Vec<CaseResult>,
}

impl RunReport {
    fn count(&self, pred: impl Fn(&CaseStatus) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.status)).count()
    }

    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Passed))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Failed { .. }))
    }

    /// 0 when nothing failed; skips do not fail a run.
    pub fn exit_code(&self) -> i32 {
        if self.failed() == 0 { 0 } else { 1 }
    }
}

/// Sequential case runner with an optional case filter.
#[derive(Debug, Default)]
pub struct Runner {
    filter: Option<String>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only run cases whose "suite > name" title contains `filter`
    /// (case-insensitive).
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into().to_lowercase());
        self
    }

    pub fn selects<C: Case + ?Sized>(&self, case: &C) -> bool {
        match &self.filter {
            Some(f) => case.title().to_lowercase().contains(f),
            None => true,
        }
    }

    pub async fn run<C: Case>(
        &self,
        browser: &mut dyn Browser,
        config: &StorecheckConfig,
        cases: &[C],
    ) -> RunReport {
        let mut report = RunReport::default();
        let ready = browser.is_ready().await;
        if !ready {
            warn!("Browser is not running; every selected case fails");
        }
        for case in cases.iter().filter(|c| self.selects(*c)) {
            info!("Running {}", case.title());
            let outcome = if ready {
                run_case(case, &mut *browser, config).await
            } else {
                Err(BrowserError::NotReady.into())
            };
            let status = match outcome {
                Ok(Outcome::Passed) => CaseStatus::Passed,
                Ok(Outcome::Skipped(reason)) => {
                    warn!("Skipped {}: {}", case.title(), reason);
                    CaseStatus::Skipped { reason }
                }
                Err(e) => {
                    warn!("Failed {}: {}", case.title(), e);
                    CaseStatus::Failed {
                        code: e.code().to_string(),
                        reason: e.to_string(),
                    }
                }
            };
            report.results.push(CaseResult {
                suite: case.suite().to_string(),
                name: case.name().to_string(),
                status,
            });
        }
        report
    }
}

async fn run_case<C: Case + ?Sized>(
    case: &C,
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    case.prepare(&mut *browser, config).await?;
    case.run(browser, config).await
}

/// Human-readable report, grouped by suite in run order.
pub fn format_report(report: &RunReport) -> String {
    let mut out = String::new();
    let mut current_suite: Option<&str> = None;
    for result in &report.results {
        if current_suite != Some(result.suite.as_str()) {
            let _ = writeln!(out, "{}", result.suite);
            current_suite = Some(result.suite.as_str());
        }
        match &result.status {
            CaseStatus::Passed => {
                let _ = writeln!(out, "  ✓ {}", result.name);
            }
            CaseStatus::Skipped { reason } => {
                let _ = writeln!(out, "  - {} (skipped: {})", result.name, reason);
            }
            CaseStatus::Failed { code, reason } => {
                let _ = writeln!(out, "  ✗ {}", result.name);
                let _ = writeln!(out, "      [{}] {}", code, reason);
            }
        }
    }
    let _ = write!(
        out,
        "\n{} passing, {} failing, {} skipped",
        report.passed(),
        report.failed(),
        report.skipped()
    );
    out
}
