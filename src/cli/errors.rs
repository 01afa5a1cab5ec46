//! Error display formatting for the CLI.

use crate::constants;
use crate::error::{Error, JsonError};

/// Prints an error message, either as JSON or user-friendly format.
pub fn print_error_with_json(error: &Error, json_format: bool) {
    if !json_format {
        print_error(error);
        return;
    }
    let json_error = error.to_json();
    let Ok(json_output) = serde_json::to_string_pretty(&json_error) else {
        print_error(error);
        return;
    };
    eprintln!("{json_output}");
}

/// Prints a user-friendly error message with context and suggestions.
pub fn print_error(error: &Error) {
    match error {
        Error::Internal {
            kind,
            message,
            context,
        } => {
            eprintln!("{kind}: {message}");
            let Some(ctx) = context else { return };
            if let Some(suggestion) = &ctx.suggestion {
                eprintln!("\nHint: {suggestion}");
            }
        }
        Error::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => {
                eprintln!(
                    "File Not Found\n{io_err}\n\nHint: {}",
                    constants::ERR_FILE_NOT_FOUND
                );
            }
            std::io::ErrorKind::PermissionDenied => {
                eprintln!(
                    "Permission Denied\n{io_err}\n\nHint: {}",
                    constants::ERR_PERMISSION
                );
            }
            _ => eprintln!("File System Error\n{io_err}"),
        },
        Error::Network(req_err) => {
            if req_err.is_connect() || req_err.is_timeout() {
                eprintln!(
                    "Connection Error\n{req_err}\n\nHint: {}",
                    constants::ERR_CONNECTION
                );
                return;
            }
            eprintln!("Network Error\n{req_err}");
        }
        Error::YamlSyntax(scan_err) => {
            eprintln!(
                "YAML Syntax Error\n{scan_err}\n\nHint: {}",
                constants::ERR_YAML_SYNTAX
            );
        }
        Error::Yaml(yaml_err) => {
            eprintln!(
                "YAML Parsing Error\n{yaml_err}\n\nHint: {}",
                constants::ERR_YAML_SYNTAX
            );
        }
        Error::Json(json_err) => eprintln!("JSON Parsing Error\n{json_err}"),
        Error::Toml(toml_err) => {
            eprintln!(
                "TOML Parsing Error\n{toml_err}\n\nHint: {}",
                constants::ERR_TOML_SYNTAX
            );
        }
    }
}

/// Prints the problems a build reported, one per line, or as one JSON array.
pub fn print_build_errors(errors: &[JsonError], json_format: bool) {
    if json_format {
        if let Ok(output) = serde_json::to_string_pretty(errors) {
            eprintln!("{output}");
            return;
        }
    }
    for error in errors {
        eprintln!("{}", error.message);
    }
}
