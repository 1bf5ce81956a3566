//! dts-bundler - Ambient declaration bundle merger
//!
//! Assembles a single distributable `.d.ts` bundle from per-type declaration
//! fragments, driven by ordered `// @merge-here <key>` markers in a
//! placeholder document. One deterministic forward pass, synchronous I/O.

pub mod config;
pub mod fragment;
pub mod marker;
pub mod merge;

pub use config::{BundleConfig, ConfigError};
pub use marker::{collect_markers, LineClassifier, PlaceholderLine};
pub use merge::{check, merge, CheckReport, MergeError, MergeReport};
