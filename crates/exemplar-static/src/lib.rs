//! Static site generator for literate example programs.
//!
//! Enumerates examples, runs each one (or reuses its cached transcript),
//! highlights code and output, and renders one page per example plus an index.

pub mod assets;
pub mod builder;
pub mod cache;
pub mod error;
pub mod page;
pub mod registry;
pub mod runner;
pub mod templates;

pub use builder::{BuildConfig, BuildResult, StaticBuilder};
pub use cache::{CacheStatus, ExecutionCache, Transcript};
pub use error::BuildError;
pub use page::{Example, PageRenderer};
pub use registry::{ExampleEntry, ExampleRegistry};
pub use runner::{CommandRunner, ExecutionError, Runner};
pub use templates::TemplateEngine;
