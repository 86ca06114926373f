//! Step-by-step treatment of one ailment.

use std::fmt;

use crate::ailments::{Ailment, AilmentId};
use crate::error::RemedyError;
use crate::ui::{Prompt, PromptType, UserInterface};

use super::detect::CancellationToken;
use super::ProjectContext;

/// Why a treatment did not run to completion without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The user declined a step.
    Declined,
    /// The run was cancelled at a step boundary.
    Cancelled,
    /// The ailment no longer applied when its turn came.
    NoLongerApplicable,
    /// The probe failed when re-checked just before treatment.
    Undetermined(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Declined => write!(f, "declined"),
            SkipReason::Cancelled => write!(f, "cancelled"),
            SkipReason::NoLongerApplicable => write!(f, "no longer applicable"),
            SkipReason::Undetermined(cause) => write!(f, "could not re-check: {}", cause),
        }
    }
}

/// Result of treating one ailment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreatmentOutcome {
    Resolved,
    Skipped(SkipReason),
    /// Stopped at the zero-based `step`. A `step` equal to the number of
    /// steps means every step ran but the ailment is still detected.
    Failed { step: usize, cause: String },
}

impl TreatmentOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, TreatmentOutcome::Failed { .. })
    }

    /// Whether the ailment was left untreated for a reason other than the
    /// user's choice or the project already being healthy.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            TreatmentOutcome::Skipped(SkipReason::Cancelled | SkipReason::Undetermined(_))
        )
    }

    /// The failure as an error attributed to `ailment`, with a one-based step.
    pub fn to_error(&self, ailment: &AilmentId) -> Option<RemedyError> {
        match self {
            TreatmentOutcome::Failed { step, cause } => Some(RemedyError::TreatmentFailed {
                ailment: ailment.to_string(),
                step: step + 1,
                message: cause.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for TreatmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreatmentOutcome::Resolved => write!(f, "resolved"),
            TreatmentOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
            TreatmentOutcome::Failed { step, cause } => {
                write!(f, "failed at step {}: {}", step + 1, cause)
            }
        }
    }
}

/// Runs an ailment's treatment steps in order.
///
/// Before each step the executor checks for cancellation and, when
/// interactive, asks for confirmation. After each step the manifest is
/// reloaded and the step's post-condition checked; a failing step stops
/// the treatment and later steps are never applied.
#[derive(Debug, Clone)]
pub struct TreatmentExecutor {
    interactive: bool,
    cancel: CancellationToken,
}

impl TreatmentExecutor {
    pub fn new(interactive: bool, cancel: CancellationToken) -> Self {
        Self {
            interactive,
            cancel,
        }
    }

    /// Treat `ailment`.
    pub fn apply(
        &self,
        ailment: &dyn Ailment,
        ctx: &mut ProjectContext,
        ui: &mut dyn UserInterface,
    ) -> TreatmentOutcome {
        let id = ailment.id();
        let steps = ailment.treatment_steps();
        let total = steps.len();

        for (index, step) in steps.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::info!("{}: cancelled before step {}", id, index + 1);
                return TreatmentOutcome::Skipped(SkipReason::Cancelled);
            }

            if self.interactive {
                let prompt = Prompt {
                    key: format!("treat.{}.{}", id, index),
                    question: step.description().to_string(),
                    prompt_type: PromptType::Confirm,
                    default: Some("true".to_string()),
                };
                let confirmed = match ui.prompt(&prompt) {
                    Ok(answer) => answer.as_bool().unwrap_or(false),
                    Err(e) => {
                        tracing::warn!("Confirmation prompt failed: {}", e);
                        false
                    }
                };
                if !confirmed {
                    return TreatmentOutcome::Skipped(SkipReason::Declined);
                }
            }

            ui.show_progress(index + 1, total);
            tracing::info!("{}: step {}/{}: {}", id, index + 1, total, step.description());
            let mut spinner = ui.start_spinner(step.description());

            if let Err(e) = step.apply(ctx) {
                spinner.finish_error(step.description());
                return TreatmentOutcome::Failed {
                    step: index,
                    cause: format!("{:#}", e),
                };
            }

            ctx.reload_manifest();
            if step.verify(ctx) == Some(false) {
                spinner.finish_error(step.description());
                return TreatmentOutcome::Failed {
                    step: index,
                    cause: format!("'{}' did not take effect", step.description()),
                };
            }

            spinner.finish_success(step.description());
        }

        TreatmentOutcome::Resolved
    }
}
