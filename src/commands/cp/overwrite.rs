use std::fs;
use std::io::{self, BufRead, Stdin, Stdout, Write};
use std::path::Path;

use super::policy::CopyPolicy;
use crate::error::CopyError;

/// 既存ターゲットに対する上書き判定の結果を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Skip,
}

/// 上書き前の確認を行う。
pub trait Confirm {
    /// `target` を上書きしてよければ `true` を返す。
    fn confirm_overwrite(&mut self, target: &Path) -> Result<bool, CopyError>;
}

/// 出力先へ確認文を書き、入力から 1 行読んで回答を判定する。
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<io::StdinLock<'static>, Stdout> {
    /// 標準入出力を使う確認プロンプトを生成する。
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm_overwrite(&mut self, target: &Path) -> Result<bool, CopyError> {
        write!(self.output, "overwrite '{}'? (y/n [n]) ", target.display())
            .and_then(|()| self.output.flush())
            .map_err(|e| CopyError::io("write prompt for", target, e))?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .map_err(|e| CopyError::io("read answer for", target, e))?;

        Ok(is_affirmative(&answer))
    }
}

/// 前後の空白を除いた回答が `y` か `Y` のときだけ肯定とみなす。
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

/// ターゲットの存在とコピー方針から、そのファイルの上書き可否を決める。
///
/// - ターゲットが無ければ常に `Proceed`
/// - no-clobber なら `DestinationExists` で全体を中断する（interactive より優先）
/// - interactive なら確認し、拒否されたら `Skip`
/// - どちらも無ければ黙って上書きする
pub fn decide<C: Confirm + ?Sized>(
    target: &Path,
    policy: &CopyPolicy,
    confirm: &mut C,
) -> Result<Decision, CopyError> {
    if !target_exists(target) {
        return Ok(Decision::Proceed);
    }

    if policy.no_clobber {
        return Err(CopyError::DestinationExists {
            path: target.to_path_buf(),
        });
    }

    if policy.interactive && !confirm.confirm_overwrite(target)? {
        return Ok(Decision::Skip);
    }

    Ok(Decision::Proceed)
}

/// 存在確認に失敗した場合も NotFound 以外は「存在する」と扱う。
fn target_exists(target: &Path) -> bool {
    match fs::metadata(target) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}
