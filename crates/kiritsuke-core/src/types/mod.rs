pub mod intent;
pub mod metadata;
pub mod result;
pub mod shape;

pub use intent::LookupIntent;
pub use metadata::{Enrichment, EnrichmentResult};
pub use result::PrettifyResult;
pub use shape::ShapeCategory;
