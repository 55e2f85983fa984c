//! Expansion of the zipped viewer distribution.

use std::{fs, io, path::Path};

/// Extracts every entry of the archive into the destination directory.
///
/// Parent directories are created as needed. Entries whose names would
/// escape the destination are skipped with a warning, everything else is
/// written with its archived contents unchanged.
///
/// # Arguments
/// * `archive_path` - Path to the zip archive.
/// * `destination` - Directory the entries are expanded into.
pub fn expand_archive(archive_path: &Path, destination: &Path) -> crate::error::Result<()> {
    let archive_file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(archive_file)?;

    log::info!(
        "Expanding {} entries from {} into {}",
        archive.len(),
        archive_path.to_string_lossy(),
        destination.to_string_lossy()
    );

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let entry_path = match entry.enclosed_name() {
            Some(name) => destination.join(name),
            None => {
                log::warn!("Skipping archive entry with unsafe name: {}", entry.name());
                continue;
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&entry_path)?;
        } else {
            if let Some(parent) = entry_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut output_file = fs::File::create(&entry_path)?;
            io::copy(&mut entry, &mut output_file)?;
        }
    }

    Ok(())
}
