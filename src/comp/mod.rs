//! Composition bookkeeping: element records, classification, the fraction
//! conversion engine, and the lock/unlock lifecycle.

mod builder;
mod classify;
mod composition;
mod engine;
mod error;
mod record;

pub use builder::{CompositionBuilder, ElementEntry};
pub use composition::Composition;
pub use error::Error;
pub use record::ElementRecord;
