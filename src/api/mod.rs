pub mod client;
pub mod error;
#[cfg(test)]
pub mod fake;
pub mod traits;
pub mod types;

pub use client::HttpBackend;
pub use error::{ApiError, ApiResult};
pub use traits::Backend;
pub use types::{
    Brain, Chat, ChatAnswer, NewBrain, SyncElement, SyncElements, SyncFilesRequest, UserData,
    UserIdentity, UserIdentityUpdate, UserSync,
};
