pub(crate) mod common;
pub mod summary;
