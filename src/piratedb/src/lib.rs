//! # piratedb
//!
//! Pirate101 template classification and projection.
//!
//! This library provides functionality to:
//! - Classify deserialized game templates (items, units, companions, talents,
//!   powers, curves) by their shape and behaviors
//! - Project each classified template into a flat, strongly-typed record
//! - Decode combat power results into tagged variants with normalized
//!   adjustment triples
//!
//! ## Example
//!
//! ```no_run
//! use piratedb::{aggregate, Context, DirArchive, PipelineConfig, TemplateManifest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = DirArchive::open("Root")?;
//! let manifest = TemplateManifest::load(&archive)?;
//! let config = PipelineConfig::default();
//!
//! let ctx = Context::new(&archive, &manifest, &config);
//! let records = aggregate::collect(&ctx, &config.scans)?;
//! println!("{} items, {} powers", records.items.len(), records.powers.len());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod archive;
pub mod behavior;
pub mod classify;
pub mod config;
pub mod context;
pub mod hash;
pub mod lang;
pub mod node;
pub mod records;
pub mod reference;
pub mod schema;

#[doc(inline)]
pub use aggregate::Records;
#[doc(inline)]
pub use archive::{Archive, DirArchive, MemoryArchive, TemplateManifest};
#[doc(inline)]
pub use classify::{classify, classify_among, Kind};
#[doc(inline)]
pub use config::{ClassifyPolicy, PipelineConfig, PowerFilter, ScanSpec, SchoolTable};
#[doc(inline)]
pub use context::Context;
#[doc(inline)]
pub use lang::LangRef;
#[doc(inline)]
pub use node::Node;
#[doc(inline)]
pub use records::{
    AdjustmentTriple, Companion, CompanionPower, CompanionTalent, Curve, Item, Power,
    ResultVariant, TemplateRecord, Talent, Unit,
};

/// Errors raised while loading or projecting templates
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Template {template} is missing required field {field}")]
    MissingField {
        template: String,
        field: &'static str,
    },

    #[error("Template {template} field {field} is not a {expected}")]
    FieldType {
        template: String,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Template manifest not found: {0}")]
    ManifestMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, Error>;
