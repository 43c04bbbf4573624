//! Path manipulation utilities for chassis
//!
//! All functions here are lexical: they never touch the filesystem, so a
//! configuration can be normalized before the directories it names exist.

use std::path::{Component, Path, PathBuf};

/// Expand `path` against `base`.
///
/// A leading `~` component is replaced with the home directory, relative
/// paths are joined onto `base`, and `.`/`..` components are folded away.
pub fn expand(path: impl AsRef<Path>, base: &Path) -> PathBuf {
    let path = path.as_ref();
    let expanded = match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        clean(&expanded)
    } else {
        clean(&base.join(expanded))
    }
}

/// Fold `.` and `..` components without resolving symlinks.
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Whether `path` is `base` or lies beneath it, compared per component.
pub fn is_within(path: &Path, base: &Path) -> bool {
    path.starts_with(base)
}

/// The `/`-separated path of `path` relative to `base`.
///
/// Returns `Some("")` when the two are equal and `None` when `path` is not
/// inside `base`.
pub fn relative_to(path: &Path, base: &Path) -> Option<String> {
    let rest = path.strip_prefix(base).ok()?;
    let segments: Vec<String> = rest
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(segments.join("/"))
}

/// Join an in-guest prefix and a relative path, omitting the separator when
/// the relative path is empty.
pub fn guest_join(prefix: &str, relative: &str) -> String {
    if relative.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), relative)
    }
}
