use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 失敗時に返す終了コード。
pub const EXIT_FAILURE: i32 = 1;

/// cp の検証・コピー処理で発生するエラー。
#[derive(Debug, Error)]
pub enum CopyError {
    /// ソースとターゲットの 2 つが揃っていない。
    #[error("missing source or destination file")]
    MissingOperand,

    #[error("source file '{}' does not exist", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("'{}' and '{}' are the same file", .source_path.display(), .target.display())]
    SameFile {
        source_path: PathBuf,
        target: PathBuf,
    },

    #[error("cannot copy directory '{}' without recursive flag (-r)", .path.display())]
    DirectoryRequiresRecursive { path: PathBuf },

    #[error(
        "cannot copy a directory, '{}', into itself, '{}'",
        .source_path.display(),
        .target.display()
    )]
    DirectoryIntoItself {
        source_path: PathBuf,
        target: PathBuf,
    },

    #[error("cannot copy '{}': Not a regular file", .path.display())]
    NotRegularFile { path: PathBuf },

    /// no-clobber 指定時にターゲットが既に存在する。
    #[error("file '{}' already exists", .path.display())]
    DestinationExists { path: PathBuf },

    /// 単一ファイルコピーで上書き確認が拒否された。
    #[error("'{}' not overwritten", .path.display())]
    PromptDeclined { path: PathBuf },

    #[error("cannot {action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    /// I/O エラーを操作内容と対象パス付きで包む。
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// プロセス終了コードを返す。どの失敗も 1 で終了する。
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}
