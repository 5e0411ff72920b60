use bookboard::cli::Cli;
use clap::Parser;
use log::error;

fn main() {
    bookboard::init_logger();

    let cli = Cli::parse();
    if let Err(err) = bookboard::run(cli.config, cli.command) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
