use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell as CompletionShell};

use crate::commands::SiteForgeArgs;

use super::SiteForgeCommand;

#[derive(Debug, Clone, Args)]
pub struct CompletionsCommand {
    #[arg(value_enum)]
    shell: CompletionShell,
}

impl SiteForgeCommand for CompletionsCommand {
    fn try_run(&mut self) -> miette::Result<()> {
        log::debug!("Generating completions for {shell}", shell = self.shell);

        generate(
            self.shell,
            &mut SiteForgeArgs::command(),
            "siteforge",
            &mut std::io::stdout().lock(),
        );

        Ok(())
    }
}
