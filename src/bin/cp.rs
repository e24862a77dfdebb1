use clap::Parser;
use clap::error::ErrorKind;
use minicp::commands::cp::{self, args::Args};
use minicp::error::EXIT_FAILURE;
use minicp::logging;

/// Copy a file, or a directory tree with `-r`.
fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(EXIT_FAILURE);
            }
        },
    };

    logging::init(args.verbose);

    let exit_code = cp::run(args);
    std::process::exit(exit_code);
}
