//! Diagnostic report.

use std::cmp::Reverse;

use console::style;

use crate::ailments::{Ailment, AilmentId, Severity};
use crate::ui::UserInterface;

use super::detect::Detection;
use super::ProjectContext;

/// An applicable ailment as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub id: AilmentId,
    pub summary: String,
    pub severity: Severity,
    pub treatable: bool,
    pub guidance: String,
}

/// A probe that could not decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProbe {
    pub id: AilmentId,
    pub cause: String,
}

/// Outcome of one detection pass.
///
/// Findings are ordered by severity, highest first, then by registration
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticReport {
    findings: Vec<Finding>,
    unknown: Vec<UnknownProbe>,
    checked: usize,
    cancelled: bool,
}

impl DiagnosticReport {
    /// Build a report from detections given in registration order.
    pub fn build<'a, I>(results: I, ctx: &ProjectContext) -> Self
    where
        I: IntoIterator<Item = (&'a dyn Ailment, Detection)>,
    {
        let mut report = Self::default();

        for (ailment, detection) in results {
            report.checked += 1;
            match detection {
                Detection::Applicable => report.findings.push(Finding {
                    id: ailment.id(),
                    summary: ailment.summary().to_string(),
                    severity: ailment.severity(),
                    treatable: ailment.treatable(),
                    guidance: ailment.guidance(ctx),
                }),
                Detection::NotApplicable => {}
                Detection::Unknown(cause) => report.unknown.push(UnknownProbe {
                    id: ailment.id(),
                    cause,
                }),
            }
        }

        // Stable sort keeps registration order within a severity.
        report.findings.sort_by_key(|f| Reverse(f.severity));
        report
    }

    /// Mark the pass as cut short; such a report is never clean.
    pub fn into_cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }

    /// Whether the pass was cancelled before every probe completed.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Applicable ailments in report order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Probes that failed.
    pub fn unknown(&self) -> &[UnknownProbe] {
        &self.unknown
    }

    /// Number of ailments probed.
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Whether the pass completed and no ailment applies.
    pub fn is_clean(&self) -> bool {
        !self.cancelled && self.findings.is_empty()
    }

    /// Applicable ailments with an automated fix, in report order.
    pub fn treatable(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.treatable)
    }

    /// Find an applicable ailment by id.
    pub fn finding(&self, id: &AilmentId) -> Option<&Finding> {
        self.findings.iter().find(|f| &f.id == id)
    }

    /// Print the report.
    pub fn render(&self, ui: &mut dyn UserInterface) {
        for probe in &self.unknown {
            ui.warning(&format!("Could not check {}: {}", probe.id, probe.cause));
        }

        if self.cancelled {
            ui.error(&format!(
                "Detection cancelled after {} checks; the project was not fully examined",
                self.checked
            ));
            if self.findings.is_empty() {
                return;
            }
        } else if self.is_clean() {
            ui.success(&format!("No issues detected ({} checks)", self.checked));
            return;
        }

        ui.show_header(&format!(
            "Detected {} issue{}",
            self.findings.len(),
            if self.findings.len() == 1 { "" } else { "s" }
        ));

        for finding in &self.findings {
            let tag = match finding.severity {
                Severity::Error => style("error").red().bold(),
                Severity::Warning => style("warning").yellow().bold(),
                Severity::Hint => style("hint").cyan(),
            };
            let mut line = format!("{} {}: {}", tag, finding.id, finding.summary);
            if finding.treatable {
                line.push_str(&format!(" {}", style("(treatable)").green()));
            }
            ui.message(&line);
            if !finding.treatable {
                ui.show_hint(&finding.guidance);
            }
        }

        let treatable = self.treatable().count();
        if treatable > 0 {
            ui.message(&format!(
                "\n{} issue{} can be fixed automatically. Run 'remedy doctor treat'.",
                treatable,
                if treatable == 1 { "" } else { "s" }
            ));
        }
    }
}
