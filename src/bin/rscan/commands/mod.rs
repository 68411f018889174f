//! Command implementations

pub mod completions;
pub mod filter;
pub mod migrations;
pub mod resolve;
pub mod scan;
pub mod types;

use anyhow::Result;
use serde::Serialize;

use resource_scanner::{LoadableResource, Location};

/// JSON view of a resource.
#[derive(Serialize)]
pub struct ResourceView<'a> {
    pub location: &'a Location,
    pub relative_path: &'a str,
    pub location_path: &'a str,
    pub filename: &'a str,
    pub absolute_path: String,
}

impl<'a> From<&'a LoadableResource> for ResourceView<'a> {
    fn from(resource: &'a LoadableResource) -> Self {
        ResourceView {
            location: resource.location(),
            relative_path: resource.relative_path(),
            location_path: resource.location_path(),
            filename: resource.filename(),
            absolute_path: resource.absolute_path(),
        }
    }
}

/// Print resources as text lines or a JSON array.
pub fn print_resources<'a, I>(resources: I, json: bool) -> Result<()>
where
    I: IntoIterator<Item = &'a LoadableResource>,
{
    if json {
        let views: Vec<ResourceView<'_>> = resources.into_iter().map(ResourceView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        for resource in resources {
            println!("{}\t{}", resource.location_path(), resource.absolute_path());
        }
    }
    Ok(())
}
