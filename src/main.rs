use std::process;
use log::{error, LevelFilter};

use usergeo::UserGeo;
use usergeo::commands::{cli, CommandFactory, UsergeoCommandFactory};
use usergeo::utils::logger::Logger;

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Some(log_file) = matches.get_one::<String>("log-file") {
        if let Err(e) = Logger::init_global_logger(log_file, level) {
            eprintln!("Error setting up global logger: {}", e);
            process::exit(1);
        }
    } else {
        let default_filter = if matches.get_flag("verbose") { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .init();
    }

    let geo = match UserGeo::from_config(matches.get_one::<String>("config").map(String::as_str)) {
        Ok(geo) => geo,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let factory = UsergeoCommandFactory::new(&geo);

    let command_result = factory.create_command(&matches);
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
