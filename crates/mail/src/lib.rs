//! Outbound email for Rouge-Cardinal.
//!
//! Only invitation emails are sent today; see [`email::EmailDelivery`].

pub mod email;

pub use email::{EmailConfig, EmailDelivery, EmailError, InvitationEmail};
