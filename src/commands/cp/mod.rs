use std::path::PathBuf;

use crate::error::CopyError;
use args::Args;
use handlers::ProcessContext;
use overwrite::{Confirm, LinePrompt};
use policy::CopyPolicy;

pub mod args;
pub mod handlers;
pub mod overwrite;
pub mod policy;

/// cp コマンド全体を実行し、結果に応じて終了コードを決定する。
///
/// 上書き確認は標準入出力で行い、エラーは `error: <message>` として標準エラーへ出す。
pub fn run(args: Args) -> i32 {
    let policy = CopyPolicy::from(&args);

    match copy_paths(&args.files, policy, LinePrompt::stdio()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

/// オペランドを検証してからコピーを実行する。
pub fn copy_paths<C: Confirm>(
    operands: &[PathBuf],
    policy: CopyPolicy,
    confirm: C,
) -> Result<(), CopyError> {
    let task = handlers::validate(operands, &policy)?;
    let mut context = ProcessContext::new(policy, confirm);
    handlers::execute(&task, &mut context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overwrite::tests::ScriptedConfirm;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn copy_paths_copies_single_file() {
        let temp_dir = tempdir().expect("create tmp dir");
        let source = temp_dir.path().join("a.txt");
        let target = temp_dir.path().join("b.txt");
        fs::write(&source, b"payload").expect("write source");

        copy_paths(
            &[source, target.clone()],
            CopyPolicy::default(),
            ScriptedConfirm::default(),
        )
        .expect("copy");

        assert_eq!(fs::read(&target).expect("read target"), b"payload");
    }

    #[test]
    fn copy_paths_does_not_touch_filesystem_on_validation_failure() {
        let temp_dir = tempdir().expect("create tmp dir");
        let source = temp_dir.path().join("A");
        fs::create_dir(&source).expect("create dir");
        fs::write(source.join("x.txt"), b"x").expect("write x");
        let target = temp_dir.path().join("B");

        let err = copy_paths(
            &[source, target.clone()],
            CopyPolicy::default(),
            ScriptedConfirm::default(),
        )
        .expect_err("must fail");

        assert!(matches!(err, CopyError::DirectoryRequiresRecursive { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn no_clobber_single_file_leaves_target_unchanged() {
        let temp_dir = tempdir().expect("create tmp dir");
        let source = temp_dir.path().join("a.txt");
        let target = temp_dir.path().join("b.txt");
        fs::write(&source, b"new").expect("write source");
        fs::write(&target, b"old").expect("write target");

        let err = copy_paths(
            &[source, target.clone()],
            CopyPolicy::new(false, true, false),
            ScriptedConfirm::default(),
        )
        .expect_err("must fail");

        assert!(matches!(err, CopyError::DestinationExists { .. }));
        assert_eq!(fs::read(&target).expect("read target"), b"old");
    }
}
