//! On-disk layout of a Chassis project.

use std::path::{Path, PathBuf};

use crate::defaults;

/// Directories derived from the project root.
///
/// Every component receives a `Layout` instead of consulting the process
/// working directory, so nothing in the library depends on where the binary
/// was started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    user_extensions_dir: Option<PathBuf>,
}

impl Layout {
    /// Creates a layout rooted at `root`, using `~/.chassis/extensions` for
    /// per-user global extensions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            user_extensions_dir: defaults::user_extensions_dir(),
        }
    }

    /// Overrides (or disables) the per-user global extensions directory.
    pub fn with_user_extensions_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.user_extensions_dir = dir;
        self
    }

    /// The project root every relative path is resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/extensions`
    pub fn extensions_dir(&self) -> PathBuf {
        self.root.join(defaults::EXTENSIONS_DIR)
    }

    /// `<root>/extensions/_global`
    pub fn global_extensions_dir(&self) -> PathBuf {
        self.extensions_dir()
            .join(defaults::GLOBAL_EXTENSIONS_SENTINEL)
    }

    /// `~/.chassis/extensions`, if a home directory is known.
    pub fn user_extensions_dir(&self) -> Option<&Path> {
        self.user_extensions_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_directories() {
        let layout = Layout::new("/proj").with_user_extensions_dir(None);
        assert_eq!(layout.root(), Path::new("/proj"));
        assert_eq!(layout.extensions_dir(), PathBuf::from("/proj/extensions"));
        assert_eq!(
            layout.global_extensions_dir(),
            PathBuf::from("/proj/extensions/_global")
        );
        assert!(layout.user_extensions_dir().is_none());
    }
}
