use std::io::Write;

use crate::error::Error;
use crate::kubernetes::VersionedResource;

/// Write one fully qualified name per row, ready for piping into further
/// resource-targeting commands. No headers, ever.
///
/// Row failures are collected so a single bad write does not hide the rest;
/// the caller still gets every failure reported together.
pub fn print(out: &mut impl Write, resources: &[VersionedResource]) -> Result<(), Error> {
    let mut errors = Vec::new();
    for resource in resources {
        if let Err(e) = writeln!(out, "{}", resource.full_name()) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Print(errors))
    }
}
