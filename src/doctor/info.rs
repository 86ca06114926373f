//! Environment report.
//!
//! The report is the base items every project gets (operating system, tool
//! versions, project type) merged with the items the active archetype
//! contributes, grouped by [`InfoCategory`].

use std::fmt;

use crate::probe::{dependency_version, tool_version};
use crate::ui::{Table, UserInterface};

use super::ProjectContext;

const NOT_INSTALLED: &str = "not installed";

/// Section of the info report an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InfoCategory {
    /// Globally installed CLI tooling.
    CliPackages,
    /// Packages installed in the project.
    LocalPackages,
    /// Operating system and runtimes.
    System,
    /// Project-level facts.
    Environment,
}

impl InfoCategory {
    /// Report order of the sections.
    pub const ORDER: [InfoCategory; 4] = [
        InfoCategory::CliPackages,
        InfoCategory::LocalPackages,
        InfoCategory::System,
        InfoCategory::Environment,
    ];
}

impl fmt::Display for InfoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoCategory::CliPackages => write!(f, "CLI packages"),
            InfoCategory::LocalPackages => write!(f, "Local packages"),
            InfoCategory::System => write!(f, "System"),
            InfoCategory::Environment => write!(f, "Environment"),
        }
    }
}

/// One line of the info report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoItem {
    pub category: InfoCategory,
    pub key: String,
    pub value: String,
}

impl InfoItem {
    pub fn new(category: InfoCategory, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Items reported for every project.
pub fn base_info(ctx: &ProjectContext) -> Vec<InfoItem> {
    let tool = |program: &str| {
        tool_version(program)
            .map(|v| v.to_string())
            .unwrap_or_else(|| NOT_INSTALLED.to_string())
    };

    vec![
        InfoItem::new(
            InfoCategory::CliPackages,
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        ),
        InfoItem::new(
            InfoCategory::LocalPackages,
            crate::ailments::base::CLI_PACKAGE,
            dependency_version(ctx.dir(), crate::ailments::base::CLI_PACKAGE)
                .map(|v| v.to_string())
                .unwrap_or_else(|| NOT_INSTALLED.to_string()),
        ),
        InfoItem::new(
            InfoCategory::System,
            "OS",
            format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH),
        ),
        InfoItem::new(InfoCategory::System, "NodeJS", tool("node")),
        InfoItem::new(InfoCategory::System, "npm", tool("npm")),
        InfoItem::new(
            InfoCategory::Environment,
            "Project type",
            ctx.archetype().display_name(),
        ),
    ]
}

/// Merge base and archetype items into one list ordered by category.
///
/// Within a category base items come first, each group in the order it
/// was produced.
pub fn merge_info(base: Vec<InfoItem>, archetype: Vec<InfoItem>) -> Vec<InfoItem> {
    let mut items: Vec<InfoItem> = base.into_iter().chain(archetype).collect();
    items.sort_by_key(|item| {
        InfoCategory::ORDER
            .iter()
            .position(|c| *c == item.category)
            .unwrap_or(InfoCategory::ORDER.len())
    });
    items
}

/// The full report for a project.
pub fn gather_info(ctx: &ProjectContext) -> Vec<InfoItem> {
    merge_info(base_info(ctx), ctx.archetype().contribute_info(ctx.dir()))
}

/// Render the report, one table per category.
pub fn render_info(items: &[InfoItem], ui: &mut dyn UserInterface) {
    for category in InfoCategory::ORDER {
        let mut table = Table::new(vec!["Name", "Value"]);
        for item in items.iter().filter(|i| i.category == category) {
            table.add_row(vec![item.key.as_str(), item.value.as_str()]);
        }
        if table.is_empty() {
            continue;
        }
        ui.show_header(&category.to_string());
        ui.message(&table.render());
    }
}
