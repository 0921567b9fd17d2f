//! Decor Core
//!
//! Decorated Go syntax trees.
//! A plain Go syntax tree keeps its comments in a flat list and encodes
//! layout only through byte positions, which makes it hard to edit without
//! losing comments. This crate converts plain trees into decorated trees
//! that carry comments and spacing on the nodes themselves, and converts
//! them back into positioned plain trees a printer can lay out.
//!
//! - [`Decorator`] turns an [`ast::File`](decor_syntax::ast::File) and its
//!   [`FileSet`](decor_syntax::FileSet) into a [`dst::File`];
//! - [`Restorer`] turns a [`dst::File`] back into a plain file registered in
//!   its own file set, optionally rewriting imports;
//! - [`resolver`] holds the strategies that decide which identifiers refer
//!   to other packages and which names those packages are printed with.

pub mod config;
pub mod decorator;
pub mod dst;
pub mod error;
pub mod resolver;
pub mod restorer;
pub mod result;

// Re-export commonly used types
pub use config::{ConfigLoader, DecorConfig, DecoratorOptions, RestorerOptions};
pub use decorator::{DecorationMap, Decorator, NodeId};
pub use dst::{Decorations, NodeRef, Slot, SpaceType};
pub use error::{DecorError, ErrorKind};
pub use resolver::{
    GuessPackageResolver, GuessRefResolver, MapPackageResolver, NoRefResolver, PackageResolver,
    RefResolver, ResolveError, TypeInfoRefResolver,
};
pub use restorer::Restorer;
pub use result::{Result, ResultExt};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("decor=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
