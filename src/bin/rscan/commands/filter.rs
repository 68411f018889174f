//! `rscan filter` command

use anyhow::Result;

use super::print_resources;
use crate::cli::FilterArgs;
use resource_scanner::ops::scan;
use resource_scanner::util::Config;
use resource_scanner::{GlobalContext, ResourceProvider};

pub fn execute(args: FilterArgs, ctx: &GlobalContext, config: &Config) -> Result<()> {
    let scanner = scan(ctx, config, &args.locations.to_options(None))?;

    let suffixes: Vec<&str> = args.suffixes.iter().map(String::as_str).collect();
    let matching = scanner.get_resources(&args.prefix, &suffixes)?;

    print_resources(matching, args.locations.json)
}
