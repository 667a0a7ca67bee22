use std::process::ExitCode;

use log::LevelFilter;

use pagemark::cli::{self, Action, USAGE};
use pagemark::config::Config;
use pagemark::logging;

fn main() -> ExitCode {
    logging::init(LevelFilter::Warn);

    let opts = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Action::Search(opts)) => opts,
        Ok(Action::PrintConfig) => {
            return match toml::to_string_pretty(&Config::default()) {
                Ok(s) => {
                    print!("{s}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            };
        }
        Ok(Action::Version) => {
            println!("pagemark {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Ok(Action::Help) => {
            println!("pagemark {}", env!("CARGO_PKG_VERSION"));
            println!("Search a saved page and print it with matches highlighted\n");
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let config = match cli::load_config(opts.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.log.level_filter());

    match cli::run(&opts, &config) {
        Ok(report) => {
            println!("{}", report.html);
            if !report.status.is_empty() {
                eprintln!("{}", report.status);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
