//! The `remedy doctor` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ailments::AilmentDeps;
use crate::cli::args::DoctorAction;
use crate::client::NpmRegistryClient;
use crate::config::{load_config, DoctorConfig};
use crate::doctor::{CancellationToken, Doctor, DoctorOptions};
use crate::error::{RemedyError, Result};
use crate::shell::ShellRunner;
use crate::ui::{RemedyTheme, Table, UserInterface};

use super::dispatcher::{Command, CommandResult, EXIT_FAILURE, EXIT_USAGE};

/// Dependencies that talk to the real registry and run real processes.
pub fn production_deps(config: &DoctorConfig) -> Result<AilmentDeps> {
    let versions = NpmRegistryClient::new(config.registry_url())?;
    Ok(AilmentDeps::new(Arc::new(versions), Arc::new(ShellRunner::new()))
        .with_package_manager(config.package_manager))
}

/// The doctor command implementation.
pub struct DoctorCommand {
    project_root: PathBuf,
    action: DoctorAction,
    concurrency: Option<usize>,
    deps: Option<AilmentDeps>,
    cancel: CancellationToken,
}

impl DoctorCommand {
    /// Create a new doctor command.
    pub fn new(project_root: &Path, action: DoctorAction) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            action,
            concurrency: None,
            deps: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Cancel the run through `token`, typically from an interrupt handler.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Override the configured concurrency.
    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Use these dependencies instead of the production ones.
    pub fn with_deps(mut self, deps: AilmentDeps) -> Self {
        self.deps = Some(deps);
        self
    }

    fn doctor(&self, ui: &dyn UserInterface) -> Result<(Doctor, DoctorConfig)> {
        let config = load_config(&self.project_root)?;
        let deps = match &self.deps {
            Some(deps) => deps
                .clone()
                .with_package_manager(config.package_manager.or(deps.package_manager)),
            None => production_deps(&config)?,
        };
        let options = DoctorOptions {
            concurrency: config.effective_concurrency(self.concurrency),
            interactive: ui.is_interactive(),
            ignore: config.ignore.clone(),
        };

        let doctor = Doctor::for_project(&self.project_root, &deps, options)?
            .with_cancellation(self.cancel.clone());
        tracing::debug!(
            "{} project at {}",
            doctor.context().archetype(),
            self.project_root.display()
        );
        Ok((doctor, config))
    }

    fn list(&self, doctor: &Doctor, config: &DoctorConfig, ui: &mut dyn UserInterface) {
        let theme = RemedyTheme::detect();
        let mut table = Table::new(vec!["Ailment", "Severity", "Fix", "Summary"]);

        for ailment in doctor.list() {
            let id = ailment.id();
            let id = if config.is_ignored(id.as_str()) {
                format!("{} (ignored)", id)
            } else {
                id.to_string()
            };
            let severity = ailment.severity();
            let severity = theme.severity(severity).apply_to(severity).to_string();
            let fix = if ailment.treatable() { "automated" } else { "manual" };
            table.add_row(vec![id.as_str(), severity.as_str(), fix, ailment.summary()]);
        }

        ui.show_header(&format!(
            "Ailments for {} projects",
            doctor.context().archetype().display_name()
        ));
        ui.message(&table.render());
    }
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (mut doctor, config) = self.doctor(ui)?;

        match &self.action {
            DoctorAction::Check => {
                let report = doctor.check(ui);
                if report.is_clean() {
                    Ok(CommandResult::success())
                } else {
                    Ok(CommandResult::failure(EXIT_FAILURE))
                }
            }
            DoctorAction::List => {
                self.list(&doctor, &config, ui);
                Ok(CommandResult::success())
            }
            DoctorAction::Treat(args) => match doctor.treat(&args.ids, ui) {
                Ok(summary) => {
                    summary.render(ui);
                    if summary.has_failures() || summary.is_incomplete() {
                        Ok(CommandResult::failure(EXIT_FAILURE))
                    } else {
                        Ok(CommandResult::success())
                    }
                }
                Err(RemedyError::UnknownAilment { id }) => {
                    ui.error(&format!("Unknown ailment: {}", id));
                    ui.show_hint("Run 'remedy doctor list' to see every ailment id.");
                    Ok(CommandResult::failure(EXIT_USAGE))
                }
                Err(e) => Err(e),
            },
        }
    }
}
