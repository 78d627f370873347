//! Unauthenticated endpoints backing the public site.
//!
//! Every query here is restricted to published, public or active rows.
//! Home page sections are gated by display toggles; a disabled section is
//! serialized as `null` so the site can tell "off" from "empty".

use std::collections::{BTreeMap, HashMap};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use rouge_core::display_toggles::{self, ToggleValue, MAX_ITEMS_LIMIT};
use rouge_core::error::CoreError;
use rouge_core::pagination::{clamp_limit, MAX_LIMIT};
use rouge_core::types::{DbId, Timestamp};
use rouge_core::validation::validate_dto;
use rouge_db::models::company_section::CompanySection;
use rouge_db::models::contact::{CreateContactMessage, NewsletterRequest, CONTACT_REASONS};
use rouge_db::models::hero_slide::HeroSlide;
use rouge_db::models::partner::Partner;
use rouge_db::models::press::{PressArticle, PressRelease};
use rouge_db::models::show::{Show, ShowDetail};
use rouge_db::models::team_member::TeamMember;
use rouge_db::repositories::{
    CompanySectionRepo, ContactMessageRepo, EventRepo, HeroSlideRepo, NewsletterRepo,
    PartnerRepo, PressArticleRepo, PressReleaseRepo, ShowRepo, SiteSettingRepo, TeamMemberRepo,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Press listings shown when nothing narrower applies.
const PRESS_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Toggle lookup
// ---------------------------------------------------------------------------

/// Snapshot of every toggle, read once per request.
struct Toggles(HashMap<String, ToggleValue>);

impl Toggles {
    async fn load(state: &AppState) -> AppResult<Self> {
        let rows = SiteSettingRepo::list(&state.pool, None).await?;
        Ok(Self(
            rows.into_iter()
                .map(|row| (row.key, ToggleValue::from_json(&row.value)))
                .collect(),
        ))
    }

    /// Missing rows count as disabled.
    fn get(&self, key: &str) -> Option<ToggleValue> {
        self.0.get(key).copied().filter(|t| t.enabled)
    }

    fn enabled(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Item cap for an enabled section.
fn section_limit(toggle: ToggleValue) -> usize {
    toggle.max_items.unwrap_or(MAX_ITEMS_LIMIT).max(1) as usize
}

fn capped<T>(mut items: Vec<T>, toggle: ToggleValue) -> Vec<T> {
    items.truncate(section_limit(toggle));
    items
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub hero_slides: Option<Vec<HeroSlide>>,
    pub about: Option<Vec<CompanySection>>,
    pub shows: Option<Vec<Show>>,
    pub headlines: Option<Vec<PressRelease>>,
    pub partners: Option<Vec<Partner>>,
    pub newsletter: bool,
}

/// GET /api/v1/public/home
pub async fn home(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let toggles = Toggles::load(&state).await?;

    let hero_slides = match toggles.get(display_toggles::HOME_HERO) {
        Some(t) => Some(capped(HeroSlideRepo::list_active(&state.pool).await?, t)),
        None => None,
    };
    let about = match toggles.get(display_toggles::HOME_ABOUT) {
        Some(t) => Some(capped(CompanySectionRepo::list_active(&state.pool).await?, t)),
        None => None,
    };
    let shows = match toggles.get(display_toggles::HOME_SHOWS) {
        Some(t) => Some(ShowRepo::list_public(&state.pool, section_limit(t) as i64).await?),
        None => None,
    };
    let headlines = match toggles.get(display_toggles::HOME_HEADLINES) {
        Some(t) => Some(PressReleaseRepo::list_public(&state.pool, section_limit(t) as i64).await?),
        None => None,
    };
    let partners = match toggles.get(display_toggles::HOME_PARTNERS) {
        Some(t) => Some(capped(PartnerRepo::list_active(&state.pool).await?, t)),
        None => None,
    };

    Ok(Json(DataResponse {
        data: HomePage {
            hero_slides,
            about,
            shows,
            headlines,
            partners,
            newsletter: toggles.enabled(display_toggles::HOME_NEWSLETTER),
        },
    }))
}

// ---------------------------------------------------------------------------
// Shows and agenda
// ---------------------------------------------------------------------------

/// GET /api/v1/public/shows?limit=
pub async fn list_shows(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, MAX_LIMIT, MAX_LIMIT);
    let shows = ShowRepo::list_public(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: shows }))
}

/// GET /api/v1/public/shows/{slug}
pub async fn get_show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let show = ShowRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Show",
                key: slug.clone(),
            })
        })?;
    let upcoming_events =
        EventRepo::list_upcoming_for_show(&state.pool, show.id, Utc::now()).await?;
    Ok(Json(DataResponse {
        data: ShowDetail {
            show,
            upcoming_events,
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct AgendaParams {
    /// Defaults to now.
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub show_id: Option<DbId>,
}

/// GET /api/v1/public/agenda?from=&to=&show_id=
pub async fn agenda(
    State(state): State<AppState>,
    Query(params): Query<AgendaParams>,
) -> AppResult<impl IntoResponse> {
    let from = params.from.unwrap_or_else(Utc::now);
    if params.to.is_some_and(|to| to < from) {
        return Err(AppError::BadRequest("'to' must not precede 'from'".into()));
    }
    let entries = EventRepo::agenda(&state.pool, from, params.to, params.show_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// Press and company
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PressPage {
    pub releases: Vec<PressRelease>,
    /// `null` while the articles section is switched off.
    pub articles: Option<Vec<PressArticle>>,
    pub media_kit: bool,
}

/// GET /api/v1/public/press
pub async fn press(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let toggles = Toggles::load(&state).await?;
    let releases = PressReleaseRepo::list_public(&state.pool, PRESS_LIMIT).await?;
    let articles = match toggles.get(display_toggles::PRESS_ARTICLES) {
        Some(t) => Some(PressArticleRepo::list(&state.pool, section_limit(t) as i64).await?),
        None => None,
    };
    Ok(Json(DataResponse {
        data: PressPage {
            releases,
            articles,
            media_kit: toggles.enabled(display_toggles::MEDIA_KIT),
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct CompanyPage {
    pub sections: Vec<CompanySection>,
    pub team: Vec<TeamMember>,
}

/// GET /api/v1/public/company
pub async fn company(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sections = CompanySectionRepo::list_active(&state.pool).await?;
    let team = TeamMemberRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse {
        data: CompanyPage { sections, team },
    }))
}

/// GET /api/v1/public/display-toggles
///
/// `{key: enabled}` for every toggle.
pub async fn toggle_map(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let Toggles(all) = Toggles::load(&state).await?;
    let map: BTreeMap<String, bool> = all.into_iter().map(|(k, v)| (k, v.enabled)).collect();
    Ok(Json(DataResponse { data: map }))
}

// ---------------------------------------------------------------------------
// Contact and newsletter
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub id: DbId,
    pub received_at: Timestamp,
}

/// POST /api/v1/public/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    if !input.consent {
        return Err(AppError::Core(CoreError::Validation(
            "consent: must be given to be contacted back".into(),
        )));
    }
    if let Some(reason) = input.reason.as_deref() {
        if !CONTACT_REASONS.contains(&reason) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "reason: must be one of {CONTACT_REASONS:?}"
            ))));
        }
    }

    let message = ContactMessageRepo::create(&state.pool, &input).await?;
    tracing::info!(message_id = message.id, reason = %message.reason, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ContactReceipt {
                id: message.id,
                received_at: message.created_at,
            },
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct SubscriptionStatus {
    pub email: String,
    pub subscribed: bool,
}

/// POST /api/v1/public/newsletter
///
/// Subscribing an already active address succeeds without change.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<NewsletterRequest>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let subscriber =
        NewsletterRepo::subscribe(&state.pool, &input.email, input.source.as_deref()).await?;
    tracing::info!(
        subscriber_id = subscriber.id,
        source = ?subscriber.source,
        "Newsletter subscription"
    );
    Ok(Json(DataResponse {
        data: SubscriptionStatus {
            email: subscriber.email,
            subscribed: true,
        },
    }))
}

/// POST /api/v1/public/newsletter/unsubscribe
///
/// Answers the same way whether or not the address was subscribed.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(input): Json<NewsletterRequest>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let removed = NewsletterRepo::unsubscribe(&state.pool, &input.email).await?;
    if removed {
        tracing::info!("Newsletter unsubscription");
    }
    Ok(Json(DataResponse {
        data: SubscriptionStatus {
            email: input.email.trim().to_lowercase(),
            subscribed: false,
        },
    }))
}
