pub mod billing;
pub mod error;
pub mod event;
pub mod id;
pub mod records;
