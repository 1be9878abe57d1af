use clap::Parser;
use siteforge::commands::{CommandArgs, SiteForgeArgs, SiteForgeCommand};
use siteforge_utils::logging::init_logger;

fn main() {
    let args = SiteForgeArgs::parse();

    init_logger(args.verbosity.log_level_filter());

    log::trace!("Parsed arguments: {args:#?}");

    match args.command {
        CommandArgs::Build(mut command) => command.run(),
        CommandArgs::Preview(mut command) => command.run(),
        CommandArgs::Shell(mut command) => command.run(),
        CommandArgs::Ensure(mut command) => command.run(),
        CommandArgs::Completions(mut command) => command.run(),
    }
}
