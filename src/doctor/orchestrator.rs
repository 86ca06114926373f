//! The doctor run state machine.
//!
//! A run moves through `Idle -> Detecting -> Clean | Reporting`, then, when
//! treatments were requested, through `Treating` (once per ailment) to
//! `Done`. Detection is concurrent; treatment is strictly sequential so no
//! two steps ever touch the project at once.

use std::path::PathBuf;

use crate::ailments::{Ailment, AilmentDeps, AilmentId, AilmentRegistry};
use crate::error::Result;
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::detect::{detect_all, detect_one, CancellationToken, Detection};
use super::info::{gather_info, InfoItem};
use super::report::DiagnosticReport;
use super::summary::TreatmentSummary;
use super::treatment::{SkipReason, TreatmentExecutor, TreatmentOutcome};
use super::ProjectContext;

/// Default number of concurrent probes.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorState {
    Idle,
    Detecting,
    Clean,
    Reporting,
    Treating,
    Done,
}

/// Run-level knobs.
#[derive(Debug, Clone)]
pub struct DoctorOptions {
    /// Maximum probes in flight. Values below one are treated as one.
    pub concurrency: usize,
    /// Ask before selecting ailments and before each step.
    pub interactive: bool,
    /// Ailment ids that are never probed.
    pub ignore: Vec<String>,
}

impl Default for DoctorOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            interactive: false,
            ignore: Vec::new(),
        }
    }
}

/// Detects, reports and treats the ailments of one project.
pub struct Doctor {
    registry: AilmentRegistry,
    ctx: ProjectContext,
    options: DoctorOptions,
    cancel: CancellationToken,
    state: DoctorState,
}

impl Doctor {
    pub fn new(registry: AilmentRegistry, ctx: ProjectContext, options: DoctorOptions) -> Self {
        Self {
            registry,
            ctx,
            options,
            cancel: CancellationToken::new(),
            state: DoctorState::Idle,
        }
    }

    /// Resolve the project in `dir` and compose its registry.
    ///
    /// Fails if the directory is unreadable or the registry has duplicate
    /// ids.
    pub fn for_project(
        dir: impl Into<PathBuf>,
        deps: &AilmentDeps,
        options: DoctorOptions,
    ) -> Result<Self> {
        let ctx = ProjectContext::resolve(dir)?;
        let registry = AilmentRegistry::for_archetype(ctx.archetype(), deps)?;
        Ok(Self::new(registry, ctx, options))
    }

    pub fn state(&self) -> DoctorState {
        self.state
    }

    pub fn context(&self) -> &ProjectContext {
        &self.ctx
    }

    pub fn registry(&self) -> &AilmentRegistry {
        &self.registry
    }

    /// Share `token` with this run, for example with an interrupt handler.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this run.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn is_ignored(&self, id: &AilmentId) -> bool {
        self.options.ignore.iter().any(|i| i == id.as_str())
    }

    /// Run one detection pass without printing anything.
    pub fn detect(&mut self) -> DiagnosticReport {
        self.state = DoctorState::Detecting;

        let ignore = &self.options.ignore;
        let ailments: Vec<&dyn Ailment> = self
            .registry
            .iter()
            .filter(|a| !ignore.iter().any(|i| i == a.id().as_str()))
            .collect();
        tracing::debug!(
            "Probing {} ailments with {} workers",
            ailments.len(),
            self.options.concurrency.max(1)
        );

        let expected = ailments.len();
        let results = detect_all(&ailments, &self.ctx, self.options.concurrency, &self.cancel);
        let completed = ailments
            .iter()
            .zip(results)
            .filter_map(|(ailment, result)| result.map(|detection| (*ailment, detection)));
        let mut report = DiagnosticReport::build(completed, &self.ctx);

        self.state = if self.cancel.is_cancelled() && report.checked() < expected {
            tracing::info!("Detection cancelled after {} probes", report.checked());
            report = report.into_cancelled();
            DoctorState::Done
        } else if report.is_clean() {
            DoctorState::Clean
        } else {
            DoctorState::Reporting
        };
        report
    }

    /// Detect and print the report.
    pub fn check(&mut self, ui: &mut dyn UserInterface) -> DiagnosticReport {
        let mut spinner = ui.start_spinner("Detecting issues");
        let report = self.detect();
        if report.is_cancelled() {
            spinner.finish_error("Detection cancelled");
        } else {
            spinner.finish_success(&format!("Checked {} ailments", report.checked()));
        }

        report.render(ui);
        if report.is_clean() {
            self.state = DoctorState::Done;
        }
        report
    }

    /// Detect, report, then treat.
    ///
    /// With `ids` empty every applicable treatable ailment is a candidate
    /// (chosen from a prompt when interactive); otherwise exactly the given
    /// ids are treated. An unknown id fails before anything is probed.
    pub fn treat(&mut self, ids: &[String], ui: &mut dyn UserInterface) -> Result<TreatmentSummary> {
        let requested: Vec<AilmentId> = self
            .registry
            .select(ids)?
            .into_iter()
            .map(|a| a.id())
            .collect();

        let report = self.check(ui);
        let mut summary = TreatmentSummary::new();
        if report.is_cancelled() {
            summary.mark_cancelled();
            return Ok(summary);
        }
        if report.is_clean() {
            return Ok(summary);
        }

        let candidates = if requested.is_empty() {
            let all: Vec<AilmentId> = report.treatable().map(|f| f.id.clone()).collect();
            if self.options.interactive && !all.is_empty() {
                self.choose(&all, &report, ui)?
            } else {
                all
            }
        } else {
            self.filter_requested(requested, &report, ui)
        };

        self.state = DoctorState::Treating;
        let executor = TreatmentExecutor::new(self.options.interactive, self.cancel.clone());

        let total = candidates.len();
        for (n, id) in candidates.into_iter().enumerate() {
            let Some(ailment) = self.registry.get(&id) else {
                continue;
            };
            let outcome = if self.cancel.is_cancelled() {
                TreatmentOutcome::Skipped(SkipReason::Cancelled)
            } else {
                // Earlier treatments may already have fixed this one.
                self.ctx.reload_manifest();
                match detect_one(ailment, &self.ctx) {
                    Detection::Applicable => {
                        ui.show_header(&format!("Treating {} ({}/{})", id, n + 1, total));
                        let outcome = executor.apply(ailment, &mut self.ctx, ui);
                        confirm_resolved(ailment, &self.ctx, outcome)
                    }
                    Detection::NotApplicable => {
                        TreatmentOutcome::Skipped(SkipReason::NoLongerApplicable)
                    }
                    Detection::Unknown(cause) => {
                        TreatmentOutcome::Skipped(SkipReason::Undetermined(cause))
                    }
                }
            };
            match outcome.to_error(&id) {
                Some(err) => tracing::warn!("{}", err),
                None => tracing::info!("{}: {}", id, outcome),
            }
            summary.record(id, outcome);
        }

        self.state = DoctorState::Done;
        Ok(summary)
    }

    fn filter_requested(
        &self,
        requested: Vec<AilmentId>,
        report: &DiagnosticReport,
        ui: &mut dyn UserInterface,
    ) -> Vec<AilmentId> {
        requested
            .into_iter()
            .filter(|id| {
                if self.is_ignored(id) {
                    ui.warning(&format!("{} is ignored by configuration", id));
                    return false;
                }
                match report.finding(id) {
                    Some(finding) if finding.treatable => true,
                    Some(_) => {
                        ui.warning(&format!("{} has no automated treatment", id));
                        false
                    }
                    None => {
                        ui.message(&format!("{} does not apply to this project", id));
                        false
                    }
                }
            })
            .collect()
    }

    fn choose(
        &self,
        candidates: &[AilmentId],
        report: &DiagnosticReport,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<AilmentId>> {
        let options = candidates
            .iter()
            .filter_map(|id| report.finding(id))
            .map(|f| PromptOption {
                label: format!("{}: {}", f.id, f.summary),
                value: f.id.to_string(),
            })
            .collect();
        let prompt = Prompt {
            key: "treat.select".to_string(),
            question: "Select issues to fix".to_string(),
            prompt_type: PromptType::MultiSelect { options },
            default: Some(
                candidates
                    .iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        };

        let chosen = match ui.prompt(&prompt)? {
            crate::ui::PromptResult::Strings(values) => values,
            other => vec![other.as_string()],
        };
        Ok(candidates
            .iter()
            .filter(|id| chosen.iter().any(|c| c == id.as_str()))
            .cloned()
            .collect())
    }

    /// Every ailment registered for this project, in registration order.
    pub fn list(&self) -> Vec<&dyn Ailment> {
        self.registry.iter().collect()
    }

    /// The environment report.
    pub fn info(&self) -> Vec<InfoItem> {
        gather_info(&self.ctx)
    }
}

/// A treatment only counts as resolved if detection agrees.
fn confirm_resolved(
    ailment: &dyn Ailment,
    ctx: &ProjectContext,
    outcome: TreatmentOutcome,
) -> TreatmentOutcome {
    if outcome != TreatmentOutcome::Resolved {
        return outcome;
    }
    let step = ailment.treatment_steps().len();
    match detect_one(ailment, ctx) {
        Detection::NotApplicable => TreatmentOutcome::Resolved,
        Detection::Applicable => TreatmentOutcome::Failed {
            step,
            cause: "still detected after treatment".to_string(),
        },
        Detection::Unknown(cause) => TreatmentOutcome::Failed {
            step,
            cause: format!("could not confirm the fix: {}", cause),
        },
    }
}
