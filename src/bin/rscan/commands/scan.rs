//! `rscan scan` command

use anyhow::Result;

use super::print_resources;
use crate::cli::ScanArgs;
use resource_scanner::ops::scan;
use resource_scanner::util::Config;
use resource_scanner::GlobalContext;

pub fn execute(args: ScanArgs, ctx: &GlobalContext, config: &Config) -> Result<()> {
    let scanner = scan(ctx, config, &args.locations.to_options(None))?;
    print_resources(scanner.resources(), args.locations.json)
}
