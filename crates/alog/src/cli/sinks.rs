//! File sinks. The engine only takes open streams; opening is done here.

use alog_core::Sink;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Open `path` for appending, creating it and its parent directories.
pub fn open_file_sink(path: &Path) -> io::Result<Sink> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Sink::from_writer(path.display().to_string(), file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "existing\n").unwrap();

        let sink = open_file_sink(&path).unwrap();
        sink.write_line("appended\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "existing\nappended\n");
        assert!(sink.name().ends_with("app.log"));
    }

    #[test]
    fn test_missing_directory_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        assert!(open_file_sink(&blocker.join("x.log")).is_err());
    }
}
