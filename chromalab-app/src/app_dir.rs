//! Where file dialogs start browsing.

use std::path::{Path, PathBuf};

use directories::UserDirs;

/// The user's Pictures folder if it exists, otherwise their home directory.
/// Falls back to the current directory when neither can be determined.
pub fn default_image_directory() -> PathBuf {
    match UserDirs::new() {
        Some(dirs) => dirs
            .picture_dir()
            .filter(|p| p.is_dir())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dirs.home_dir().to_path_buf()),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Directory to remember after a file was opened or saved.
pub fn parent_directory(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_of_file() {
        assert_eq!(
            parent_directory(Path::new("/tmp/pics/cat.png")),
            Some(PathBuf::from("/tmp/pics"))
        );
    }

    #[test]
    fn bare_file_name_has_no_parent() {
        assert_eq!(parent_directory(Path::new("cat.png")), None);
    }
}
