use clap::{command, crate_authors, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::error;

pub mod build;
pub mod completions;
pub mod ensure;
pub mod preview;
pub mod shell;

pub trait SiteForgeCommand {
    /// Runs the command and returns a result
    /// of the execution.
    ///
    /// # Errors
    /// Can return a `miette` Report.
    fn try_run(&mut self) -> miette::Result<()>;

    /// Runs the command and exits if there is an error.
    fn run(&mut self) {
        if let Err(e) = self.try_run() {
            error!("{e:?}");
            std::process::exit(1);
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "SiteForge",
    about,
    long_about = None,
    author = crate_authors!(),
    version,
)]
pub struct SiteForgeArgs {
    #[command(subcommand)]
    pub command: CommandArgs,

    #[clap(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub enum CommandArgs {
    /// Compile the website into website/public
    Build(build::BuildCommand),

    /// Run a local server to preview the website
    /// and watch for changes
    Preview(preview::PreviewCommand),

    /// Open an interactive shell inside the site image
    /// for manual generator invocations
    Shell(shell::ShellCommand),

    /// Verify that the external tools needed to build
    /// the site are installed
    Ensure(ensure::EnsureCommand),

    /// Generate shell completions for your shell to stdout
    Completions(completions::CompletionsCommand),
}
