//! Rendering of the filtered, sorted resource list.

mod name;
mod table;

use std::io::Write;

use crate::cli::OutputFormat;
use crate::error::Error;
use crate::kubernetes::VersionedResource;

pub use table::Columns;

/// Render `resources` to `out` in the requested format.
///
/// The sink is flushed exactly once, on every exit path; a flush failure is
/// fatal since the output may be undelivered.
pub fn print_resources(
    out: &mut impl Write,
    resources: &[VersionedResource],
    format: Option<OutputFormat>,
    no_headers: bool,
) -> Result<(), Error> {
    let result = match format {
        Some(OutputFormat::Name) => name::print(out, resources),
        Some(OutputFormat::Wide) => table::print(out, resources, Columns::Wide, no_headers),
        None => table::print(out, resources, Columns::Default, no_headers),
    };

    out.flush().map_err(Error::Flush)?;

    result
}
