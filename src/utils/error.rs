use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Failed to connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unexpected request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Parsing error: {message}")]
    Parse { message: String },

    #[error("No job listings found")]
    NoListings,

    #[error("Failed to extract job #{position}: {message}")]
    Extraction { position: usize, message: String },

    #[error("Failed to open output file {path}: {source}")]
    OutputOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error for {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Logging setup failed: {message}")]
    LoggingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Parse,
    Empty,
    Extraction,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorCategory {
    pub fn severity(self) -> ErrorSeverity {
        match self {
            ErrorCategory::Empty | ErrorCategory::Extraction => ErrorSeverity::Low,
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Parse | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }
}

impl ErrorSeverity {
    /// Process exit status for a run that ended at this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ScraperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Timeout { .. }
            | Self::Connection { .. }
            | Self::HttpStatus { .. }
            | Self::Request(_) => ErrorCategory::Transport,
            Self::Parse { .. } => ErrorCategory::Parse,
            Self::NoListings => ErrorCategory::Empty,
            Self::Extraction { .. } => ErrorCategory::Extraction,
            Self::OutputOpen { .. } | Self::OutputWrite { .. } | Self::IoError(_) => {
                ErrorCategory::Output
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::LoggingError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Re-labels an extractor failure as a skipped listing at `position`.
    pub fn at_listing(self, position: usize) -> Self {
        match self {
            Self::Extraction { message, .. } => Self::Extraction { position, message },
            other => Self::Extraction {
                position,
                message: other.to_string(),
            },
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "The site is slow to respond; the next scheduled run will try again",
            Self::Connection { .. } => "Check network connectivity and that the target host is reachable",
            Self::HttpStatus { .. } | Self::Request(_) => {
                "Verify the target URL and that the site is not blocking the user agent"
            }
            Self::Parse { .. } => "The page markup may have changed; inspect the fetched HTML",
            Self::NoListings => "Check that the listings page still uses the expected class names",
            Self::Extraction { .. } => "Inspect the listing markup for the skipped job",
            Self::OutputOpen { .. } | Self::OutputWrite { .. } | Self::IoError(_) => {
                "Check that the output directory exists, is writable and has free space"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line arguments"
            }
            Self::LoggingError { .. } => "Check that the log file location is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Transport => format!("Could not fetch the jobs page: {}", self),
            ErrorCategory::Parse => format!("Could not read the jobs page: {}", self),
            ErrorCategory::Empty => "No job listings were found on the page".to_string(),
            ErrorCategory::Extraction => format!("A job listing was skipped: {}", self),
            ErrorCategory::Output => format!("Could not save the CSV file: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
