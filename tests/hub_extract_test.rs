use anyhow::Result;
use opendata_nodes::nodes::hub::unpack_and_list;
use std::fs;
use std::io::Write;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

fn write_fixture_archive(path: &std::path::Path) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = zip::ZipWriter::new(file);
    writer.start_file("readme.txt", SimpleFileOptions::default())?;
    writer.write_all(b"fixture dataset\n")?;
    writer.add_directory("shapes", SimpleFileOptions::default())?;
    writer.start_file("shapes/points.csv", SimpleFileOptions::default())?;
    writer.write_all(b"longitude,latitude\n-122.3,47.6\n")?;
    writer.finish()?;
    Ok(())
}

#[test]
fn test_extraction_populates_destination_and_lists_entries() -> Result<()> {
    let temp = tempdir()?;
    let dest = temp.path().join("hub_data");
    assert!(!dest.exists());

    // Mirror the node's own sequence: create the destination, store the
    // archive inside it, extract in place, list immediate entries.
    fs::create_dir_all(&dest)?;
    let archive_path = dest.join("item.zip");
    write_fixture_archive(&archive_path)?;

    let entries = unpack_and_list(&archive_path, &dest)?;

    assert!(dest.join("readme.txt").exists());
    assert!(dest.join("shapes").join("points.csv").exists());

    // One listed path per entry actually on disk: the archive itself, the
    // extracted file, and the extracted directory.
    let on_disk = fs::read_dir(&dest)?.count();
    assert_eq!(entries.len(), on_disk);
    assert_eq!(entries.len(), 3);
    for entry in &entries {
        assert!(entry.starts_with(dest.to_str().unwrap()));
    }
    Ok(())
}

#[test]
fn test_corrupt_archive_is_fatal() -> Result<()> {
    let temp = tempdir()?;
    let dest = temp.path().join("hub_data");
    fs::create_dir_all(&dest)?;
    let archive_path = dest.join("item.zip");
    fs::write(&archive_path, b"not a zip archive")?;

    assert!(unpack_and_list(&archive_path, &dest).is_err());
    Ok(())
}
