//! Git hooks management command

use clap::{Args, Subcommand};
use console::style;
use tracing::info;

use commitlint_git::hooks::{self, HOOK_NAME};
use commitlint_git::GitRepo;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Manage the commit-msg hook (install, uninstall, status)
#[derive(Debug, Args)]
pub struct HooksCommand {
    #[command(subcommand)]
    pub subcommand: HooksSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum HooksSubcommand {
    /// Install the commit-msg hook, backing up any existing one
    Install,
    /// Remove the commit-msg hook and restore the backup
    Uninstall,
    /// Show whether the hook is installed
    Status,
}

impl HooksCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let repo = GitRepo::discover(&std::env::current_dir()?)?;
        let hooks_dir = repo.hooks_dir();

        match &self.subcommand {
            HooksSubcommand::Install => {
                info!(dir = %hooks_dir.display(), "installing commit-msg hook");
                hooks::install_hook(&hooks_dir)?;
                if !cli.quiet {
                    output::success(&format!("Installed {} hook", style(HOOK_NAME).cyan()));
                }
            }
            HooksSubcommand::Uninstall => {
                info!(dir = %hooks_dir.display(), "uninstalling commit-msg hook");
                hooks::uninstall_hook(&hooks_dir)?;
                if !cli.quiet {
                    output::success(&format!("Uninstalled {} hook", style(HOOK_NAME).cyan()));
                }
            }
            HooksSubcommand::Status => {
                let status = hooks::status(&hooks_dir);
                match cli.format {
                    OutputFormat::Json => output::print_json(&serde_json::json!({
                        "hook": HOOK_NAME,
                        "installed": status.installed,
                        "foreign": status.foreign,
                        "has_backup": status.has_backup,
                    }))?,
                    OutputFormat::Text => {
                        let state = if status.installed {
                            style("installed").green().to_string()
                        } else if status.foreign {
                            style("not managed by commitlint").yellow().to_string()
                        } else {
                            style("not installed").dim().to_string()
                        };
                        println!("{}", output::key_value(HOOK_NAME, &state));
                        if status.has_backup {
                            println!("{}", output::key_value("backup", "present"));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
