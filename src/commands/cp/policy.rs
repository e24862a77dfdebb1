use super::args::Args;

/// コマンドラインフラグから構築する、実行中不変のコピー方針。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyPolicy {
    pub interactive: bool,
    pub no_clobber: bool,
    pub recursive: bool,
}

impl CopyPolicy {
    pub fn new(interactive: bool, no_clobber: bool, recursive: bool) -> Self {
        Self {
            interactive,
            no_clobber,
            recursive,
        }
    }
}

impl From<&Args> for CopyPolicy {
    fn from(args: &Args) -> Self {
        Self::new(args.interactive, args.no_clobber, args.recursive)
    }
}
