use std::fs::{self, File};
use std::io;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::overwrite::{self, Confirm, Decision};
use super::policy::CopyPolicy;
use crate::error::CopyError;
use crate::paths;

/// コピー先ディレクトリを新規作成する際のパーミッション。
pub const DIRECTORY_MODE: u32 = 0o755;

/// cp 実行時に必要な方針と確認手段を保持するコンテキスト。
pub struct ProcessContext<C> {
    pub policy: CopyPolicy,
    pub confirm: C,
}

impl<C: Confirm> ProcessContext<C> {
    /// コピー方針と上書き確認手段をまとめたコンテキストを生成する。
    pub fn new(policy: CopyPolicy, confirm: C) -> Self {
        Self { policy, confirm }
    }
}

/// コピー対象の種別を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    File,
    RecursiveDirectory,
}

/// 検証済みのコピータスク情報を保持する。
#[derive(Debug)]
pub struct CopyTask {
    pub kind: CopyKind,
    pub source: PathBuf,
    pub target: PathBuf,
}

/// 引数を検証し、実行タスクを構築する。何もコピーしない。
///
/// # 検証順序
/// 1. オペランドがちょうど 2 つであること
/// 2. ソースが存在すること
/// 3. ターゲットが存在する場合、ソースと同一実体でないこと
/// 4. ソースがディレクトリなら `-r` が指定されていること
/// 5. ディレクトリをその配下へコピーしようとしていないこと
/// 6. ソースが通常ファイルかディレクトリであること
pub fn validate(operands: &[PathBuf], policy: &CopyPolicy) -> Result<CopyTask, CopyError> {
    let [source, target] = operands else {
        return Err(CopyError::MissingOperand);
    };

    let source_meta = fs::metadata(source).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CopyError::SourceNotFound {
                path: source.clone(),
            }
        } else {
            CopyError::io("stat", source, e)
        }
    })?;

    ensure_not_same_file(source, &source_meta, target)?;

    let kind = if source_meta.is_dir() {
        if !policy.recursive {
            return Err(CopyError::DirectoryRequiresRecursive {
                path: source.clone(),
            });
        }
        if paths::is_within(target, source) {
            return Err(CopyError::DirectoryIntoItself {
                source_path: source.clone(),
                target: target.clone(),
            });
        }
        CopyKind::RecursiveDirectory
    } else if source_meta.is_file() {
        CopyKind::File
    } else {
        return Err(CopyError::NotRegularFile {
            path: source.clone(),
        });
    };

    Ok(CopyTask {
        kind,
        source: source.clone(),
        target: target.clone(),
    })
}

/// ターゲットが存在し、ソースと同一実体ならエラーにする。
fn ensure_not_same_file(
    source: &Path,
    source_meta: &fs::Metadata,
    target: &Path,
) -> Result<(), CopyError> {
    let target_meta = match fs::metadata(target) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(CopyError::io("stat", target, e)),
    };

    if paths::same_entry(source, source_meta, target, &target_meta) {
        return Err(CopyError::SameFile {
            source_path: source.to_path_buf(),
            target: target.to_path_buf(),
        });
    }

    Ok(())
}

/// コピー種別に応じた実処理を行う。
///
/// 単一ファイルで上書き確認が拒否された場合は `PromptDeclined` を返す。
pub fn execute<C: Confirm>(
    task: &CopyTask,
    context: &mut ProcessContext<C>,
) -> Result<(), CopyError> {
    match task.kind {
        CopyKind::File => {
            match overwrite::decide(&task.target, &context.policy, &mut context.confirm)? {
                Decision::Proceed => copy_file(&task.source, &task.target),
                Decision::Skip => Err(CopyError::PromptDeclined {
                    path: task.target.clone(),
                }),
            }
        }
        CopyKind::RecursiveDirectory => copy_dir_recursive(&task.source, &task.target, context),
    }
}

/// ファイル内容をコピーし、その後ソースのパーミッションを適用する。
///
/// ハンドルはスコープ終了時に必ず閉じられる。
pub fn copy_file(source: &Path, target: &Path) -> Result<(), CopyError> {
    {
        let mut reader = File::open(source).map_err(|e| CopyError::io("open", source, e))?;
        let mut writer = File::create(target).map_err(|e| CopyError::io("create", target, e))?;
        io::copy(&mut reader, &mut writer).map_err(|e| CopyError::io("write", target, e))?;
    }

    let permissions = fs::metadata(source)
        .map_err(|e| CopyError::io("stat", source, e))?
        .permissions();
    fs::set_permissions(target, permissions)
        .map_err(|e| CopyError::io("set permissions on", target, e))?;

    info!("'{}' -> '{}'", source.display(), target.display());
    Ok(())
}

/// ディレクトリを深さ優先で走査し、配下を同構造でコピーする。
///
/// 走査順は `read_dir` の返す順序に従う。各ファイルで上書き判定を行い、
/// 確認が拒否されたファイルだけを飛ばして兄弟の処理を続ける。
pub fn copy_dir_recursive<C: Confirm>(
    source: &Path,
    target: &Path,
    context: &mut ProcessContext<C>,
) -> Result<(), CopyError> {
    let entries = fs::read_dir(source)
        .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
        .map_err(|e| CopyError::io("read directory", source, e))?;

    create_target_dir(target)?;

    for entry in entries {
        let entry_path = entry.path();
        let target_path = target.join(entry.file_name());

        let file_type = entry
            .file_type()
            .map_err(|e| CopyError::io("stat", &entry_path, e))?;

        if file_type.is_dir() {
            copy_dir_recursive(&entry_path, &target_path, context)?;
            continue;
        }

        let is_regular = fs::metadata(&entry_path)
            .map_err(|e| CopyError::io("stat", &entry_path, e))?
            .is_file();
        if !is_regular {
            return Err(CopyError::NotRegularFile { path: entry_path });
        }

        match overwrite::decide(&target_path, &context.policy, &mut context.confirm)? {
            Decision::Proceed => copy_file(&entry_path, &target_path)?,
            Decision::Skip => warn!("'{}' not overwritten", target_path.display()),
        }
    }

    Ok(())
}

/// ターゲットディレクトリを親を含めて作成する。既存なら何もしない。
fn create_target_dir(target: &Path) -> Result<(), CopyError> {
    if target.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(target).map_err(|e| CopyError::io("create directory", target, e))?;

    #[cfg(unix)]
    fs::set_permissions(target, fs::Permissions::from_mode(DIRECTORY_MODE))
        .map_err(|e| CopyError::io("set permissions on", target, e))?;

    debug!("created directory '{}'", target.display());
    Ok(())
}
