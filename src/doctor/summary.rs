//! End-of-run treatment summary.

use crate::ailments::AilmentId;
use crate::ui::{Table, UserInterface};

use super::treatment::TreatmentOutcome;

/// Outcome of every ailment a treatment run touched, in treatment order.
#[derive(Debug, Clone, Default)]
pub struct TreatmentSummary {
    outcomes: Vec<(AilmentId, TreatmentOutcome)>,
    cancelled: bool,
}

impl TreatmentSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: AilmentId, outcome: TreatmentOutcome) {
        self.outcomes.push((id, outcome));
    }

    pub fn outcomes(&self) -> &[(AilmentId, TreatmentOutcome)] {
        &self.outcomes
    }

    /// The outcome recorded for `id`.
    pub fn outcome(&self, id: &str) -> Option<&TreatmentOutcome> {
        self.outcomes
            .iter()
            .find(|(ailment, _)| ailment.as_str() == id)
            .map(|(_, outcome)| outcome)
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|(_, o)| o.is_failed())
    }

    /// Record that the run was cancelled before treatment started.
    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    /// Whether the run stopped without settling every selected ailment.
    pub fn is_incomplete(&self) -> bool {
        self.cancelled || self.outcomes.iter().any(|(_, o)| o.is_incomplete())
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Print the summary table and a closing line.
    pub fn render(&self, ui: &mut dyn UserInterface) {
        if self.is_empty() {
            if self.cancelled {
                ui.error("Cancelled before any treatment ran");
            } else {
                ui.message("Nothing was treated.");
            }
            return;
        }

        let mut table = Table::new(vec!["Ailment", "Outcome"]);
        for (id, outcome) in &self.outcomes {
            let outcome = outcome.to_string();
            table.add_row(vec![id.as_str(), outcome.as_str()]);
        }
        ui.show_header("Treatment summary");
        ui.message(&table.render());

        let failed = self.outcomes.iter().filter(|(_, o)| o.is_failed()).count();
        if failed > 0 {
            ui.error(&format!(
                "{} of {} treatments failed",
                failed,
                self.outcomes.len()
            ));
        } else if self.is_incomplete() {
            ui.warning("Some ailments were left untreated; run 'remedy doctor check' to see where the project stands");
        } else {
            ui.success("All selected treatments finished");
        }
    }
}
