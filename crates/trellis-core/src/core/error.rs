use thiserror::Error;

pub type TrellisResult<T> = Result<T, TrellisError>;

#[derive(Error, Debug)]
pub enum TrellisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Package error: {0}")]
    Package(String),

    #[error("Script error: {0}")]
    Script(String),

    /// Install failure with a message meant for the user verbatim.
    #[error("{0}")]
    Install(String),

    /// A subprocess exited with a non-zero status. `output` keeps the raw
    /// tool text so callers can pattern-match known failures before
    /// deciding how to surface them.
    #[error("Command '{command}' failed: {output}")]
    Subprocess { command: String, output: String },

    /// A subprocess exited with a non-zero status code.
    /// The exit code should be propagated to the shell.
    #[error("Command exited with code {0}")]
    SubprocessExit(i32),
}
