pub mod brains;
pub mod delete;
pub mod fetch;
pub mod requests;

pub use brains::{add_knowledge, create_and_feed, remove_brain, BrainCreation, BrainRemoval};
pub use delete::{start_delete, DeleteMessage};
pub use fetch::{FetchKind, FetchOutcome, Fetcher};
