//! Constants used throughout ztp-template

/// Log target used when no explicit one is given
pub const DEFAULT_LOG_TARGET: &str = "ztp_template";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// File extensions accepted for input data files
pub mod data_files {
    pub const JSON: &[&str] = &["json"];
    pub const YAML: &[&str] = &["yaml", "yml"];
}

/// Names of the template function extensions
pub mod functions {
    pub const BASE64: &str = "base64";
    pub const EXECUTE: &str = "execute";
    pub const JSON: &str = "json";

    /// Deepest chain of `execute` calls a render may make.
    pub const MAX_EXECUTE_DEPTH: usize = 100;
}

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
