use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use season_organizer::organize::{CliOptions, OrganizeConfig, SeasonOrganizer};

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Rename season episodes and place subtitles into episode folders"
)]
struct Args {
    /// Optional season directory, defaults to the current directory
    #[arg(value_hint = clap::ValueHint::DirPath)]
    path: Option<PathBuf>,

    /// Apply changes without asking for confirmation
    #[arg(short, long)]
    auto: bool,

    /// Print debug information
    #[arg(short = 'D', long)]
    debug: bool,

    /// Only print planned changes without modifying files
    #[arg(short, long)]
    print: bool,

    /// Additional file extension to delete
    #[arg(short, long, num_args = 1, action = clap::ArgAction::Append, name = "EXTENSION")]
    trash: Vec<String>,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn cli_options(&self) -> CliOptions {
        CliOptions {
            auto: self.auto,
            debug: self.debug,
            dryrun: self.print,
            trash_extensions: self.trash.clone(),
            verbose: self.verbose,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        season_organizer::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"))
    } else {
        let root = season_organizer::resolve_input_directory(args.path.as_deref())?;
        let config = OrganizeConfig::from_cli(args.cli_options())?;
        if let Err(error) = SeasonOrganizer::new(root, config).run() {
            season_organizer::print_error!("{error:#}");
            std::process::exit(1);
        }
        Ok(())
    }
}
