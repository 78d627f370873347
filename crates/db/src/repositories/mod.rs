//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod company_section_repo;
pub mod contact_repo;
pub mod event_repo;
pub mod hero_slide_repo;
pub mod invitation_repo;
pub mod media_repo;
pub mod newsletter_repo;
pub mod ordering;
pub mod partner_repo;
pub mod press_article_repo;
pub mod press_contact_repo;
pub mod press_release_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod show_repo;
pub mod site_setting_repo;
pub mod team_member_repo;
pub mod user_repo;
pub mod venue_repo;

pub use company_section_repo::CompanySectionRepo;
pub use contact_repo::ContactMessageRepo;
pub use event_repo::EventRepo;
pub use hero_slide_repo::HeroSlideRepo;
pub use invitation_repo::InvitationRepo;
pub use media_repo::{MediaFolderRepo, MediaRepo, MediaTagRepo};
pub use newsletter_repo::NewsletterRepo;
pub use partner_repo::PartnerRepo;
pub use press_article_repo::PressArticleRepo;
pub use press_contact_repo::PressContactRepo;
pub use press_release_repo::PressReleaseRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use show_repo::ShowRepo;
pub use site_setting_repo::SiteSettingRepo;
pub use team_member_repo::TeamMemberRepo;
pub use user_repo::UserRepo;
pub use venue_repo::VenueRepo;
