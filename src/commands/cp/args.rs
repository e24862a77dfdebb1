use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cp", version)]
#[command(about = "Copy a file, or a directory tree with -r", long_about = None)]
pub struct Args {
    /// 既存ファイルを上書きする前に確認する
    #[arg(short = 'i')]
    pub interactive: bool,

    /// 既存ファイルを上書きせずにエラー終了する
    #[arg(short = 'n')]
    pub no_clobber: bool,

    /// Copy directories recursively
    #[arg(short = 'r', short_alias = 'R', long = "recursive")]
    pub recursive: bool,

    /// Print each copied file
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Source and destination
    pub files: Vec<PathBuf>,
}
