//! Constants used throughout regnote

/// Context file extensions understood by `Context::from_path`
pub const CONTEXT_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Separator used when a list value is flattened into a context string
pub const LIST_SEPARATOR: &str = ", ";

/// Separator between parent and child keys of a nested context object
pub const NESTED_KEY_SEPARATOR: &str = ".";

/// Default text for the `marker` missing-key policy, `{}` is the placeholder name
pub const DEFAULT_MISSING_MARKER: &str = "<missing:{}>";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
