use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid sync.conf {path}: {message}\n{content}")]
    InvalidJson {
        path: String,
        message: String,
        content: String,
    },

    #[error("failed to serialize sync.conf: {0}")]
    Serialize(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("{count} agent processes found, refusing to pick a stop target")]
    AmbiguousProcess { count: usize },

    #[error("failed to signal agent process {pid}: {source}")]
    Signal { pid: u32, source: nix::Error },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
