use crate::model::Snapshot;
use crate::MapError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the snapshot document to the given path
///
/// The document has two top-level collections, `systems` and
/// `stargates`, each mapping string-formatted IDs to the full fetched
/// records. Written once, at the end of a fully successful run; a failed
/// run writes nothing.
///
/// # Arguments
///
/// * `snapshot` - The merged result of a complete fetch
/// * `path` - Destination file, overwritten if it exists
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<(), MapError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, snapshot)?;
    writer.flush()?;
    Ok(())
}
