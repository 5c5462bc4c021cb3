pub mod envelope;
pub mod error;
pub mod logger;
pub mod object_id;
pub mod serde_ext;
pub mod slug;
pub mod storage;
pub mod validation;
