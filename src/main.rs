// src/main.rs

use jumplist_manager::core::{CoreConfigManager, JumpListConfig, JumpListResult, path_utils};
use serde_json::Value;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str =
    "usage: jumplist-manager [--app-name NAME] (--delete | --user-tasks FILE | CATEGORIES_FILE)";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Delete,
    UserTasks(PathBuf),
    Update(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    app_name: Option<String>,
    command: Command,
}

fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut app_name = None;
    let mut command = None;

    while let Some(arg) = args.next() {
        let next = match arg.as_str() {
            "--app-name" => {
                app_name = Some(args.next().ok_or("--app-name needs a value")?);
                continue;
            }
            "--delete" => Command::Delete,
            "--user-tasks" => {
                Command::UserTasks(PathBuf::from(args.next().ok_or("--user-tasks needs a file")?))
            }
            other if other.starts_with("--") => return Err(format!("unknown option '{other}'")),
            file => Command::Update(PathBuf::from(file)),
        };
        if command.replace(next).is_some() {
            return Err("only one request may be given".to_string());
        }
    }

    Ok(CliArgs {
        app_name,
        command: command.ok_or("no request given")?,
    })
}

fn init_logging(config: &JumpListConfig) {
    let level = config.log_level_filter();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));
    let mut file_error = None;
    if config.log_to_file {
        match path_utils::log_file_path(&config.app_name).map(|path| (File::create(&path), path)) {
            Some((Ok(file), _)) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Some((Err(e), path)) => file_error = Some(format!("{path:?}: {e}")),
            None => file_error = Some("no config directory".to_string()),
        }
    }
    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("Failed to initialize logging: {e}");
        return;
    }
    if let Some(reason) = file_error {
        log::warn!("Main: Logging to terminal only, log file unavailable ({reason}).");
    }
}

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn read_json(path: &Path) -> Option<Value> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Main: Failed to read {path:?}: {e}");
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("Main: {path:?} is not valid JSON: {e}");
            None
        }
    }
}

#[cfg(target_os = "windows")]
fn run(config: &JumpListConfig, command: &Command) -> JumpListResult {
    use jumplist_manager::core::{JumpListItem, JumpListManager, JumpListRequest};
    use jumplist_manager::core::category_parser::{items_to_value, parse_item_array};
    use jumplist_manager::platform_layer::{
        ComApartment, Win32ShellBackend, register_process_identity,
    };

    let _apartment = match ComApartment::initialize() {
        Ok(apartment) => apartment,
        Err(e) => {
            log::error!("Main: {e}");
            return JumpListResult::GenericError;
        }
    };
    let app_user_model_id = config.app_user_model_id();
    if register_process_identity(&app_user_model_id).is_err() {
        return JumpListResult::GenericError;
    }
    let manager = JumpListManager::new(Win32ShellBackend, app_user_model_id);

    match command {
        Command::Delete => manager.delete_jump_list(),
        Command::UserTasks(path) => {
            let Some(value) = read_json(path) else {
                return JumpListResult::ArgumentError;
            };
            let tasks = match parse_item_array(&value) {
                Ok(tasks) => tasks,
                Err(e) => {
                    log::error!("Main: Invalid user tasks in {path:?}: {e}");
                    return JumpListResult::ArgumentError;
                }
            };
            if manager.set_user_tasks(&tasks) {
                JumpListResult::Success
            } else {
                JumpListResult::GenericError
            }
        }
        Command::Update(path) => {
            let Some(categories) = read_json(path) else {
                return JumpListResult::ArgumentError;
            };
            manager.set_jump_list(JumpListRequest::Update(
                |minimum_slots, removed: &[JumpListItem]| {
                    log::info!(
                        "Main: Shell shows at least {minimum_slots} items; removed by user: {}",
                        items_to_value(removed)
                    );
                    categories
                },
            ))
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn run(_config: &JumpListConfig, command: &Command) -> JumpListResult {
    log::error!("Main: The Windows shell is unavailable on this platform; cannot run {command:?}.");
    JumpListResult::GenericError
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            println!("{}", JumpListResult::ArgumentError);
            return ExitCode::FAILURE;
        }
    };

    let app_name = args
        .app_name
        .clone()
        .unwrap_or_else(|| JumpListConfig::default().app_name);
    let (config, config_error) = match CoreConfigManager::new().load_or_create_config(&app_name) {
        Ok(config) => (config, None),
        Err(e) => (JumpListConfig::new(app_name.as_str()), Some(e)),
    };
    init_logging(&config);
    if let Some(e) = config_error {
        log::warn!("Main: Using default configuration for '{app_name}': {e}");
    }

    let result = run(&config, &args.command);
    println!("{result}");
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
