//! Whole-file replacement via a temporary file and a rename.

use std::{io::Write as _, path::Path};

use crate::{Error, Result};

/// Write `content` to `path` atomically.
///
/// The temporary file is created next to the target so the final rename
/// never crosses a filesystem boundary.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
  let parent = path.parent().unwrap_or_else(|| Path::new("."));

  let mut temp =
    tempfile::NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
  temp
    .write_all(content.as_bytes())
    .map_err(|e| Error::io(temp.path(), e))?;
  temp.as_file().sync_all().map_err(|e| Error::io(temp.path(), e))?;
  temp.persist(path).map_err(|e| Error::io(path, e.error))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replaces_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.txt");
    std::fs::write(&path, "old\ncontent\n").unwrap();

    write_atomic(&path, "new\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
  }

  #[test]
  fn leaves_no_temporary_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entry.txt");
    write_atomic(&path, "a").unwrap();
    write_atomic(&path, "b").unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
      .unwrap()
      .map(|e| e.unwrap().file_name())
      .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("entry.txt")]);
  }
}
