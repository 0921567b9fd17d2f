//! Configuration for decorating and restoring
//!
//! Options can be built in code or loaded from a configuration file. Two
//! formats are supported:
//! - `decor.toml` - TOML
//! - `.decor.json` - JSON
//!
//! When no explicit path is given, the loader searches the start directory
//! and its parents for one of these files.
//!
//! ## Example Configuration
//!
//! ```toml
//! [decorator]
//! strictResolution = true
//!
//! [restorer]
//! manageImports = true
//! guessUnknownPackages = false
//!
//! [restorer.aliases]
//! "github.com/example/pkg/v2" = "pkg"
//! ```

mod loader;
mod options;

pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
pub use options::{DecorConfig, DecoratorOptions, RestorerOptions};
