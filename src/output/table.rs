use std::io::Write;

use comfy_table::presets::NOTHING;
use comfy_table::Table;

use crate::error::Error;
use crate::kubernetes::VersionedResource;

/// Column set for the table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    Default,
    Wide,
}

const HEADERS: [&str; 6] = [
    "NAME",
    "SHORTNAMES",
    "APIVERSION",
    "NAMESPACED",
    "KIND",
    "PREFERRED",
];
const WIDE_HEADERS: [&str; 2] = ["VERBS", "CATEGORIES"];

/// Write the resource list as an aligned, borderless table.
pub fn print(
    out: &mut impl Write,
    resources: &[VersionedResource],
    columns: Columns,
    no_headers: bool,
) -> Result<(), Error> {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    if !no_headers {
        table.set_header(headers(columns));
    }
    for resource in resources {
        table.add_row(row(resource, columns));
    }

    // comfy-table pads every cell on both sides by default; kubectl-style
    // output wants nothing before the first column and a two-space gutter
    // between the rest.
    let column_count = headers(columns).len();
    for (idx, column) in table.column_iter_mut().enumerate() {
        let right = if idx + 1 == column_count { 0 } else { 2 };
        column.set_padding((0, right));
    }

    writeln!(out, "{table}").map_err(|e| Error::Print(vec![e]))
}

fn headers(columns: Columns) -> Vec<String> {
    let mut headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    if columns == Columns::Wide {
        headers.extend(WIDE_HEADERS.iter().map(|h| h.to_string()));
    }
    headers
}

fn row(resource: &VersionedResource, columns: Columns) -> Vec<String> {
    let descriptor = &resource.resource;
    let mut cells = vec![
        descriptor.name.clone(),
        descriptor.short_names.as_deref().unwrap_or_default().join(","),
        resource.api_version(),
        descriptor.namespaced.to_string(),
        descriptor.kind.clone(),
        resource.preferred.to_string(),
    ];
    if columns == Columns::Wide {
        cells.push(descriptor.verbs.join(","));
        cells.push(descriptor.categories.as_deref().unwrap_or_default().join(","));
    }
    cells
}
