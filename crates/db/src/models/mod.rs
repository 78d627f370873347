//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod company_section;
pub mod contact;
pub mod event;
pub mod hero_slide;
pub mod media;
pub mod partner;
pub mod press;
pub mod session;
pub mod show;
pub mod site_setting;
pub mod team_member;
pub mod user;
pub mod venue;
