use std::ffi::OsString;
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::MetadataExt;
use std::path::{Component, Path, PathBuf};

/// 2 つのメタデータが同一のファイル実体を指すかを判定する。
#[cfg(unix)]
pub fn same_entry(
    _source_path: &Path,
    source: &fs::Metadata,
    _target_path: &Path,
    target: &fs::Metadata,
) -> bool {
    source.dev() == target.dev() && source.ino() == target.ino()
}

/// 2 つのメタデータが同一のファイル実体を指すかを判定する。
///
/// inode を持たない環境では正規化後のパスで比較する。
#[cfg(not(unix))]
pub fn same_entry(
    source_path: &Path,
    _source: &fs::Metadata,
    target_path: &Path,
    _target: &fs::Metadata,
) -> bool {
    match (source_path.canonicalize(), target_path.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// `target` が `ancestor` 自身またはその配下に解決されるかを判定する。
pub fn is_within(target: &Path, ancestor: &Path) -> bool {
    let ancestor = canonicalize_with_missing(&absolute(ancestor));
    let target = canonicalize_with_missing(&absolute(target));
    target.starts_with(ancestor)
}

/// 相対パスをカレントディレクトリ基準の絶対パスにする。
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// 非存在パスを含む場合でも、既存部分を基準に正規化する。
fn canonicalize_with_missing(path: &Path) -> PathBuf {
    if path.exists() {
        return path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    }

    let mut existing = path;
    let mut missing_tail: Vec<OsString> = Vec::new();

    while !existing.exists() {
        let Some(name) = existing.file_name() else {
            break;
        };
        missing_tail.push(name.to_os_string());

        let Some(parent) = existing.parent() else {
            break;
        };
        existing = parent;
    }

    let mut resolved = existing
        .canonicalize()
        .unwrap_or_else(|_| existing.to_path_buf());

    for part in missing_tail.iter().rev() {
        resolved.push(part);
    }

    normalize_lexically(&resolved)
}

/// `.` と `..` を語彙的に解決する。
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(name) => normalized.push(name),
        }
    }

    normalized
}
