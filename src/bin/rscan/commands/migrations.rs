//! `rscan migrations` command

use anyhow::Result;

use crate::cli::MigrationsArgs;
use resource_scanner::ops::{list_migrations, scan};
use resource_scanner::util::Config;
use resource_scanner::GlobalContext;

pub fn execute(args: MigrationsArgs, ctx: &GlobalContext, config: &Config) -> Result<()> {
    let scanner = scan(ctx, config, &args.locations.to_options(None))?;
    let entries = list_migrations(&scanner, &config.migration_naming())?;

    if args.locations.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        let repeatable = if entry.repeatable { " (repeatable)" } else { "" };
        println!("{:<10} {}{}\t{}", entry.kind, entry.path, repeatable, entry.location);
    }

    Ok(())
}
