use aggregator_core::logging;

mod cli;

use crate::cli::Invocation;

fn main() {
    // Argument errors are reported before anything touches the filesystem.
    let args = match cli::parse_invocation(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Usage(message) => {
            println!("{}", message);
            println!("{}", cli::USAGE);
            return;
        }
        Invocation::Clap(err) => err.exit(),
    };

    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli::run(args) {
        eprintln!("aggregator error: {:#}", err);
        std::process::exit(1);
    }
}
