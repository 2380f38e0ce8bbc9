//! Lookalike - medoid-based lookalike audience classifier
//!
//! Builds a golden seed from a known-positive cohort and classifies other
//! behavior vectors by their similarity to it.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use lookalike::cli::{Cli, Command};
use lookalike::commands;
use lookalike::ui::{self, Log};

fn main() {
	let cli = Cli::parse();
	Log::set_verbose(cli.verbose);

	if let Err(e) = dispatch(cli.command) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn dispatch(command: Command) -> Result<()> {
	match command {
		Command::Run {
			positive,
			comparison,
			main_group,
			comparison_group,
			test_fraction,
			percentile,
			seed,
			metric,
			save,
			export,
		} => commands::run::run(commands::run::RunArgs {
			positive: &positive,
			comparison: &comparison,
			main_group: &main_group,
			comparison_group: &comparison_group,
			test_fraction,
			percentile,
			seed,
			metric,
			save: save.as_deref(),
			export: export.as_deref(),
		}),
		Command::Score {
			seed_file,
			input,
			group,
			percentile,
			export,
		} => commands::score::run(&seed_file, &input, &group, percentile, export.as_deref()),
		Command::Centers {
			positive,
			main_group,
			test_fraction,
			runs,
			seed,
			limit,
		} => commands::centers::run(&positive, &main_group, test_fraction, runs, seed, limit),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			if let Some(sub) = subcommand {
				if let Some(sub_cmd) = cmd.find_subcommand_mut(&sub) {
					sub_cmd.print_help()?;
				} else {
					ui::error(&format!("Unknown subcommand: {}", sub));
					cmd.print_help()?;
				}
			} else {
				cmd.print_help()?;
			}
			Ok(())
		}
	}
}
