use tracing::level_filters::LevelFilter;

/// stderr 向けの tracing subscriber を初期化する。
///
/// 通常は警告のみ、`verbose` 指定時はコピーした各ファイルも出力する。
/// 既に subscriber が登録済みの場合は何もしない。
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .without_time()
        .try_init();
}
