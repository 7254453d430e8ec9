mod cli;

use std::path::{Path, PathBuf};

use prompt_dna_core::config::ConfigStore;
use prompt_dna_core::logging::{configure_logging, get_logger, Logger};
use prompt_dna_core::validation::{
    validate_file_path, validate_language_support, validate_memory_key, validate_string_pattern,
    PathRequirements,
};

fn main() {
    if let Err(error) = run() {
        eprintln!("prompt-dna failed: {error}");
        std::process::exit(1);
    }
}

fn run() -> prompt_dna_core::Result<()> {
    let args = cli::Cli::parse_args();
    configure_logging(&args.log_level)?;
    let logger = get_logger("prompt_dna.cli");

    tracing::debug!(command = ?args.command, "dispatching command");
    let result = match args.command {
        cli::Command::Config { command } => {
            let env_file = args.env_file.as_deref().map(Path::new);
            ConfigStore::new(env_file)
                .and_then(|config| handle_config_command(&config, command, &logger))
        }
        cli::Command::Validate { command } => handle_validate_command(command, &logger),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(error) => {
            logger.exception("command failed", &error);
            Err(error)
        }
    }
}

fn handle_config_command(
    config: &ConfigStore,
    command: cli::ConfigCommand,
    logger: &Logger,
) -> prompt_dna_core::Result<String> {
    let output = match command {
        cli::ConfigCommand::Get {
            key,
            default,
            required,
        } => {
            let value = config.get(&key, default.as_deref(), required)?;
            logger.bind("key", key.as_str()).debug("config value read");
            display_optional(value)
        }
        cli::ConfigCommand::Int {
            key,
            default,
            required,
        } => {
            let value = config.get_int(&key, default, required)?;
            logger.bind("key", key.as_str()).debug("config integer read");
            display_optional(value)
        }
        cli::ConfigCommand::Bool { key, default } => {
            let value = config.get_bool(&key, default);
            logger.bind("key", key.as_str()).debug("config flag read");
            value.to_string()
        }
        cli::ConfigCommand::Path {
            key,
            default,
            required,
        } => {
            let value = config.get_path(&key, default.map(PathBuf::from), required)?;
            logger.bind("key", key.as_str()).debug("config path read");
            display_optional(value.map(|path| path.display().to_string()))
        }
    };
    Ok(output)
}

fn handle_validate_command(
    command: cli::ValidateCommand,
    logger: &Logger,
) -> prompt_dna_core::Result<String> {
    let output = match command {
        cli::ValidateCommand::MemoryKey { key } => {
            let key = validate_memory_key(&key)?;
            logger.bind("key", key).info("memory key valid");
            key.to_owned()
        }
        cli::ValidateCommand::Language { name } => {
            let language = validate_language_support(&name)?;
            logger
                .bind("input", name.as_str())
                .bind("language", language.as_str())
                .info("language supported");
            language.to_string()
        }
        cli::ValidateCommand::Path {
            path,
            allow_missing,
            dir,
        } => {
            let requirements = PathRequirements {
                must_exist: !allow_missing,
                must_be_file: !dir,
                must_be_dir: dir,
            };
            let path = validate_file_path(&path, requirements)?;
            logger
                .bind("path", path.display().to_string())
                .info("path valid");
            path.display().to_string()
        }
        cli::ValidateCommand::Pattern {
            value,
            pattern,
            name,
            min,
            max,
        } => {
            let value = validate_string_pattern(&value, &pattern, &name, min, max)?;
            logger
                .bind("name", name.as_str())
                .bind("pattern", pattern.as_str())
                .info("value matches pattern");
            value.to_owned()
        }
    };
    Ok(output)
}

fn display_optional<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "<unset>".to_owned(),
    }
}
