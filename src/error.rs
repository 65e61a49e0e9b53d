use std::fmt;
use std::io;

/// Problems with the embedded sprite table. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// A sprite the game needs is not in the table
    Missing(&'static str),

    /// A sprite has no rows or no columns
    Empty(&'static str),

    /// A row's width differs from the first row's
    Ragged {
        name: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssetError::Missing(name) => write!(f, "sprite '{}' is missing", name),
            AssetError::Empty(name) => write!(f, "sprite '{}' is empty", name),
            AssetError::Ragged { name, row, expected, found } => write!(
                f,
                "sprite '{}' row {} is {} cells wide, expected {}",
                name, row, found, expected
            ),
        }
    }
}

impl std::error::Error for AssetError {}

/// Problems reading or validating the settings file.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    /// A field holds a value the game cannot run with
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read settings: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse settings: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid setting '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(error: io::Error) -> Self {
        ConfigError::Io(error)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse(error)
    }
}

/// Everything that can stop the binary.
#[derive(Debug)]
pub enum GameError {
    Asset(AssetError),
    Config(ConfigError),
    Terminal(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::Asset(e) => write!(f, "asset error: {}", e),
            GameError::Config(e) => write!(f, "config error: {}", e),
            GameError::Terminal(e) => write!(f, "terminal error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Asset(e) => Some(e),
            GameError::Config(e) => Some(e),
            GameError::Terminal(e) => Some(e),
        }
    }
}

impl From<AssetError> for GameError {
    fn from(error: AssetError) -> Self {
        GameError::Asset(error)
    }
}

impl From<ConfigError> for GameError {
    fn from(error: ConfigError) -> Self {
        GameError::Config(error)
    }
}

impl From<io::Error> for GameError {
    fn from(error: io::Error) -> Self {
        GameError::Terminal(error)
    }
}
