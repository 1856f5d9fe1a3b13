//! Program entrypoint and argument parsing.

use std::env;
use std::fs::File;
use std::io::{self, Read};

use anyhow::{anyhow, Result};

use ean_validator::process;

static ARG_MSG: &str = "Expected at most one positional argument (path to CSV file, default stdin)";

/// Parse Arg
///
/// Parse an optional single positional argument, returning an error if more are present.
fn parse_arg() -> Result<Option<String>> {
	let mut args = env::args();
	if args.len() > 2 {
		return Err(anyhow!(ARG_MSG));
	}
	Ok(args.nth(1))
}

fn main() -> Result<()> {
	env_logger::init();
	let mut input: Box<dyn Read> = match parse_arg()? {
		Some(filepath) => Box::new(File::open(filepath)?),
		None => Box::new(io::stdin()),
	};
	let mut output = io::stdout();
	process::run(&mut input, &mut output)
}
