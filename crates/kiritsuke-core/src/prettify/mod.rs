//! # Prettify Module
//!
//! The filename rewrite pipeline:
//!
//! - **Strip** (`strip`): file extension and leading release-group tag
//! - **Cascade** (`cascade`): ordered shape rules and their rewrites
//! - **Edition** (`edition`): "Director's Cut" style markers
//! - **End metadata** (`end_metadata`): resolution, source and codec tails
//! - **Text** (`text`): period replacement, whitespace and title casing
//! - **Unified** (`unified`): the `Prettifier` tying it all together

pub mod cascade;
pub mod edition;
pub mod end_metadata;
pub mod strip;
pub mod text;
pub mod unified;

pub use cascade::{Draft, ShapeCascade};
pub use edition::{EditionExtractor, EditionSplit};
pub use end_metadata::EndMetadataStripper;
pub use strip::{strip_extension, GroupStripper};
pub use unified::{PrettifyConfig, Prettifier};
