//! Remedy CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use remedy::cli::{Cli, CommandDispatcher};
use remedy::doctor::CancellationToken;
use remedy::shell::is_ci;
use remedy::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("remedy=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("remedy=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Route Ctrl-C into `token` so runs stop at the next probe or step
/// boundary. A second Ctrl-C exits immediately.
fn install_interrupt_handler(token: &CancellationToken) {
    let token = token.clone();
    let result = ctrlc::set_handler(move || {
        if token.is_cancelled() {
            std::process::exit(130);
        }
        eprintln!("\nInterrupted; stopping after the current step (Ctrl-C again to abort)");
        token.cancel();
    });
    if let Err(e) = result {
        tracing::warn!("Cannot install interrupt handler: {}", e);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Remedy starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let project_root = match cli.project.clone() {
        Some(path) => path,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("✗ Cannot determine the current directory: {}", e);
                return ExitCode::from(1);
            }
        },
    };

    let is_interactive = !cli.non_interactive && !is_ci();
    let mut ui = create_ui(is_interactive, output_mode);

    let cancel = CancellationToken::new();
    install_interrupt_handler(&cancel);

    let dispatcher = CommandDispatcher::new(project_root).with_cancellation(cancel);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
