use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A placeholder referenced by the template has no value in the context.
    #[error("Missing value for placeholder '{0}'.")]
    MissingKey(String),

    #[error("IO error: {0}.")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON context. Original error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML context. Original error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render. Original error: {0}")]
    MiniJinja(#[from] minijinja::Error),

    /// The context document parsed but is not a mapping of names to values.
    #[error("Invalid context: {0}.")]
    ContextFormat(String),

    #[error("Cannot load context from '{path}': expected a .json, .yaml or .yml file.")]
    UnsupportedContextFormat { path: String },

    #[error("Invalid assignment '{0}': expected KEY=VALUE.")]
    InvalidAssignment(String),

    #[error("Unknown built-in template '{name}'. Available: {available}.")]
    UnknownBuiltin { name: String, available: String },

    #[error("Cannot proceed: give either a template file or --builtin, not both or neither.")]
    TemplateSource,
}

/// Convenience type alias for Results with regnote's Error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
