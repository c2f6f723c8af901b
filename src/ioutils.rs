use std::path::Path;

use crate::error::Result;

/// Writes `content` to `dest_path`, creating missing parent directories.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested/deeper/notice.txt");
        write_file("body", &dest).unwrap();
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "body");
    }
}
