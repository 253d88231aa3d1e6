//! Shell completion generation command.
//!
//! The script goes to stdout; installation hints go to stderr so that
//! `staybook completions zsh > _staybook` captures only the script.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "staybook";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# {} completion for {BIN_NAME}; to install:", self.shell);
                for line in hint.lines() {
                    eprintln!("#   {line}");
                }
                eprintln!();
            }
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

/// How to install the script for shells with a conventional location.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some(
            "staybook completions bash > ~/.local/share/bash-completion/completions/staybook\n\
             or add to ~/.bashrc: eval \"$(staybook completions bash)\"",
        ),
        Shell::Zsh => Some(
            "staybook completions zsh > ~/.zsh/completions/_staybook\n\
             (with ~/.zsh/completions in $fpath)",
        ),
        Shell::Fish => Some("staybook completions fish > ~/.config/fish/completions/staybook.fish"),
        Shell::PowerShell => {
            Some("staybook completions powershell | Out-String | Invoke-Expression")
        }
        _ => None,
    }
}
