use std::{
    fs,
    io::{self, Write},
    path::Path,
};
use tempfile::NamedTempFile;

/// Write a file next to `dest` and move it into place once `write` succeeds.
///
/// If `write` or the rename fails the temporary file is deleted on drop, so
/// `dest` is either fully replaced or left as it was.
pub fn write_atomically<P, F>(dest: P, write: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let dest = dest.as_ref();
    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    write(temp.as_file_mut())?;
    temp.as_file_mut().flush()?;
    temp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomically_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.png");
        fs::write(&dest, b"old contents").unwrap();

        write_atomically(&dest, |f| f.write_all(b"new")).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.png");

        let result = write_atomically(&dest, |f| {
            f.write_all(b"partial")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        });
        assert!(result.is_err());
        assert!(!dest.try_exists().unwrap());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
