//! The `remedy info` command.

use std::path::{Path, PathBuf};

use crate::doctor::{gather_info, render_info, ProjectContext};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints the environment report for a project.
pub struct InfoCommand {
    project_root: PathBuf,
}

impl InfoCommand {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

impl Command for InfoCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = ProjectContext::resolve(&self.project_root)?;

        let mut spinner = ui.start_spinner("Gathering environment information");
        let items = gather_info(&ctx);
        spinner.finish_clear();

        render_info(&items, ui);
        Ok(CommandResult::success())
    }
}
