//! Activity Playlist Backend Library
//!
//! This library provides the functionality behind the `moodlist` service: it
//! authenticates a user against the Spotify Web API, summarizes their listening
//! history into a taste profile, picks recommendation seeds for a chosen
//! activity and turns the recommended tracks into a playlist on the user's
//! account.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for login, profile, recommendations and playlist building
//! - `cli` - Command-line entry points (`serve`, `activities`)
//! - `config` - Configuration management and environment variables
//! - `error` - Error kinds shared by every layer
//! - `management` - Session-scoped credential and taste storage
//! - `server` - Router construction and the HTTP listener
//! - `spotify` - Spotify Web API client implementation
//! - `taste` - Taste profile aggregation, seed selection and query building
//! - `types` - Wire data structures and table rows
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use moodlist::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> moodlist::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     cli::serve(config, false).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod taste;
pub mod types;
pub mod utils;

pub use error::{Error, ErrorKind};

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate returns this alias so the error kind
/// (data, configuration, seed search, upstream, authorization) survives up to
/// the HTTP boundary.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for request progress and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist {} created", playlist_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used while the binary starts up (configuration, listener binding).
/// Request handling never terminates the process; failures there are
/// returned as [`Error`] values and logged with [`warning!`].
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a failed request, a retried upstream
/// call or a popular playlist that could not be analyzed.
///
/// # Example
///
/// ```
/// warning!("Upstream returned 502, retrying ({}/{})", attempt, max);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
