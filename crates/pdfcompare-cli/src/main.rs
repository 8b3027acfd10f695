mod cli;
mod compare_cmd;
mod logging;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Help and version requests go to stdout and exit 0.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{e}");
            std::process::exit(1);
        }
    };
    logging::init(cli.verbose);

    let code = if cli.capabilities {
        match compare_cmd::print_capabilities(cli.format) {
            Ok(()) => 0,
            Err(code) => code,
        }
    } else {
        match compare_cmd::run(&cli) {
            Ok(status) => status.code(),
            Err(code) => code,
        }
    };
    std::process::exit(code);
}
