#![deny(missing_docs)]
#![doc = "Shared error taxonomy, seeding policy and provenance for the election workshop crates."]

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{ElecError, ErrorInfo};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, fresh_seed, resolve_seed, RngHandle};
pub use types::{is_probability, sums_to_one, SHARE_TOLERANCE};
