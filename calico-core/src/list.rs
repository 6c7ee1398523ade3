use crate::domain::EntryRow;
use crate::error::Result;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

/// Reads back the entry table of a `.calico` (zip) archive.
pub fn list(archive: &Path) -> Result<Vec<EntryRow>> {
    let f = File::open(archive)?;
    let mut zip = ZipArchive::new(f)?;
    let mut rows = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let e = zip.by_index(i)?;
        rows.push(EntryRow {
            name: e.name().to_string(),
            size: e.size(),
            compressed_size: e.compressed_size(),
            method: e.compression(),
        });
    }
    Ok(rows)
}
