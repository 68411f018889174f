//! `rscan resolve` command

use anyhow::{bail, Result};

use super::print_resources;
use crate::cli::ResolveArgs;
use resource_scanner::ops::scan;
use resource_scanner::util::Config;
use resource_scanner::{GlobalContext, ResourceProvider};

pub fn execute(args: ResolveArgs, ctx: &GlobalContext, config: &Config) -> Result<()> {
    let scanner = scan(ctx, config, &args.locations.to_options(None))?;

    match scanner.get_resource(&args.name) {
        Some(resource) => print_resources([resource], args.locations.json),
        None => bail!("resource not found: {}", args.name),
    }
}
