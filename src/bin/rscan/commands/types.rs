//! `rscan types` command

use anyhow::Result;
use serde::Serialize;

use crate::cli::TypesArgs;
use resource_scanner::ops::scan;
use resource_scanner::util::Config;
use resource_scanner::{GlobalContext, Location, TypeKind, TypeProvider};

#[derive(Serialize)]
struct TypeView<'a> {
    name: &'a str,
    kind: TypeKind,
    location: &'a Location,
}

pub fn execute(args: TypesArgs, ctx: &GlobalContext, config: &Config) -> Result<()> {
    let opts = args.locations.to_options(args.capability.as_deref());
    let scanner = scan(ctx, config, &opts)?;
    let types = scanner.get_types();

    if args.locations.json {
        let views: Vec<_> = types
            .iter()
            .map(|ty| TypeView {
                name: ty.name(),
                kind: ty.descriptor().kind,
                location: ty.location(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        for ty in types {
            println!("{}\t{}", ty.name(), ty.location());
        }
    }

    Ok(())
}
