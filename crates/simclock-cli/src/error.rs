//! Error types for the simclock terminal companion.

/// Top-level error for the `simclock-cli` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: simclock_core::config::ConfigError,
    },

    /// The tick feed stopped on a transport failure.
    #[error("feed error: {source}")]
    Feed {
        /// The underlying feed error.
        #[from]
        source: simclock_core::feed::FeedError,
    },

    /// A snapshot could not be rendered.
    #[error("calendar error: {source}")]
    Calendar {
        /// The underlying calendar error.
        #[from]
        source: simclock_core::CalendarError,
    },

    /// Writing a rendered line to stdout failed.
    #[error("failed to write output: {source}")]
    Output {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
