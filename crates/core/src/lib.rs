//! Rouge-Cardinal domain core.
//!
//! Pure business rules shared by the database and API crates. Nothing in
//! this crate performs I/O.

pub mod display_toggles;
pub mod error;
pub mod image_url;
pub mod media;
pub mod pagination;
pub mod publication;
pub mod reorder;
pub mod roles;
pub mod slug;
pub mod types;
pub mod validation;
