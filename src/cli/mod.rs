//! # CLI Module
//!
//! Command-line entry points of the `moodlist` binary.
//!
//! - [`serve`] - loads the activity tables, builds the shared state and runs
//!   the HTTP server; optionally opens the login page in the browser
//! - [`activities`] - prints the activity keyword and formula tables
//!
//! ## Usage Patterns
//!
//! ```bash
//! moodlist serve                       # run the backend
//! moodlist serve --open                # run and open the login page
//! moodlist activities                  # show the built-in tables
//! moodlist activities --catalog a.json # show a custom catalog
//! ```

mod activities;
mod serve;

pub use activities::activities;
pub use activities::load_catalog;
pub use serve::serve;
