use std::process;
use log::error;

use haarkit::utils::logger::Logger;
use haarkit::commands::{build_cli, CommandFactory, HaarkitCommandFactory};

fn main() {
    let matches = build_cli().get_matches();

    let verbose = matches.get_flag("verbose");
    match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(log_file) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        }
        None => {
            let default_level = if verbose { "debug" } else { "info" };
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
                .init();
        }
    }

    let logger = match matches.get_one::<String>("report") {
        Some(report_file) => match Logger::new(report_file) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error initializing report: {}", e);
                process::exit(1);
            }
        },
        None => Logger::disabled(),
    };

    let factory = HaarkitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
