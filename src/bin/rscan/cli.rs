//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use resource_scanner::ops::ScanOptions;
use resource_scanner::{Capability, Encoding, Location};

/// rscan - discover and index resources and implementing types
#[derive(Parser)]
#[command(name = "rscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file applied on top of the global and project config
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every resource found under the locations
    Scan(ScanArgs),

    /// Resolve one resource by relative or absolute path
    Resolve(ResolveArgs),

    /// List resources whose file name matches a prefix and suffixes
    Filter(FilterArgs),

    /// List discovered types implementing a capability
    Types(TypesArgs),

    /// Classify discovered SQL scripts and types as migrations
    Migrations(MigrationsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every scanning command.
#[derive(Args, Clone, Default)]
pub struct LocationArgs {
    /// Location to scan (`classpath:PATH`, `filesystem:PATH` or a bare classpath path)
    #[arg(
        short = 'l',
        long = "location",
        value_name = "LOCATION",
        env = "RSCAN_LOCATIONS",
        value_delimiter = ','
    )]
    pub locations: Vec<Location>,

    /// Classpath root: a directory, zip/jar/war, tar or tar.gz
    #[arg(long = "classpath", value_name = "ROOT")]
    pub classpath: Vec<PathBuf>,

    /// Resource text encoding (utf-8, iso-8859-1)
    #[arg(long)]
    pub encoding: Option<Encoding>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl LocationArgs {
    /// Convert to scan overrides.
    pub fn to_options(&self, capability: Option<&str>) -> ScanOptions {
        ScanOptions {
            locations: self.locations.clone(),
            classpath: self.classpath.clone(),
            encoding: self.encoding,
            capability: capability.map(Capability::new),
        }
    }
}

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub locations: LocationArgs,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Relative path (case-insensitive) or absolute path of the resource
    pub name: String,

    #[command(flatten)]
    pub locations: LocationArgs,
}

#[derive(Args)]
pub struct FilterArgs {
    /// File name prefix (empty matches any)
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Accepted file name suffix (repeatable)
    #[arg(long = "suffix", value_name = "SUFFIX")]
    pub suffixes: Vec<String>,

    #[command(flatten)]
    pub locations: LocationArgs,
}

#[derive(Args)]
pub struct TypesArgs {
    /// Capability the types must implement (defaults to the configured one)
    #[arg(long)]
    pub capability: Option<String>,

    #[command(flatten)]
    pub locations: LocationArgs,
}

#[derive(Args)]
pub struct MigrationsArgs {
    #[command(flatten)]
    pub locations: LocationArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
