//! Integration tests for content repositories against a real database:
//! show/event lifecycle, cascades, constraint violations, the public agenda
//! and press release publication rules.

use chrono::{Duration, Utc};
use rouge_db::models::event::{CreateShowEvent, EventFilter, UpdateShowEvent};
use rouge_db::models::press::CreatePressRelease;
use rouge_db::models::show::{CreateShow, UpdateShow};
use rouge_db::models::venue::CreateVenue;
use rouge_db::repositories::{EventRepo, PressReleaseRepo, ShowRepo, VenueRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_show(title: &str, public: bool) -> CreateShow {
    CreateShow {
        title: title.to_string(),
        slug: None,
        status: Some(if public { "published" } else { "draft" }.to_string()),
        short_description: None,
        description: None,
        genre: Some("théâtre".to_string()),
        duration_minutes: Some(90),
        casting: None,
        premiere_on: None,
        image_url: public.then(|| "https://cdn.example.com/affiche.jpg".to_string()),
        image_media_id: None,
        is_public: public,
    }
}

fn new_event(show_id: i64, venue_id: Option<i64>, days_from_now: i64) -> CreateShowEvent {
    CreateShowEvent {
        show_id,
        venue_id,
        starts_at: Utc::now() + Duration::days(days_from_now),
        ends_at: None,
        status: None,
        ticket_url: None,
        capacity: None,
        price_cents: Some(1800),
        notes: None,
    }
}

fn new_venue(name: &str) -> CreateVenue {
    CreateVenue {
        name: name.to_string(),
        address: None,
        city: Some("Lyon".to_string()),
        postal_code: None,
        country: None,
        capacity: Some(250),
        latitude: None,
        longitude: None,
    }
}

fn new_release(title: &str, slug: &str, public: bool, image: bool) -> (CreatePressRelease, String) {
    (
        CreatePressRelease {
            title: title.to_string(),
            slug: None,
            description: None,
            published_on: None,
            image_url: image.then(|| "https://cdn.example.com/cp.jpg".to_string()),
            image_media_id: None,
            document_media_id: None,
            show_id: None,
            event_id: None,
            is_public: public,
        },
        slug.to_string(),
    )
}

// ---------------------------------------------------------------------------
// Shows and events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_show_lifecycle(pool: PgPool) {
    let show = ShowRepo::create(&pool, &new_show("Les Bonnes", false), "les-bonnes", None)
        .await
        .unwrap();
    assert_eq!(show.status, "draft");
    assert!(!show.is_public);

    let update = UpdateShow {
        title: None,
        slug: None,
        status: Some("archived".to_string()),
        short_description: Some("Genet".to_string()),
        description: None,
        genre: None,
        duration_minutes: None,
        casting: None,
        premiere_on: None,
        image_url: None,
        image_media_id: None,
        is_public: None,
    };
    let updated = ShowRepo::update(&pool, show.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "archived");
    assert_eq!(updated.short_description.as_deref(), Some("Genet"));
    // Fields not in the patch are kept.
    assert_eq!(updated.title, "Les Bonnes");
    assert_eq!(updated.duration_minutes, Some(90));

    assert!(ShowRepo::update(&pool, 999_999, &update).await.unwrap().is_none());
    assert!(ShowRepo::delete(&pool, show.id).await.unwrap());
    assert!(!ShowRepo::delete(&pool, show.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_is_rejected(pool: PgPool) {
    ShowRepo::create(&pool, &new_show("Phèdre", false), "phedre", None)
        .await
        .unwrap();
    let err = ShowRepo::create(&pool, &new_show("Phèdre", false), "phedre", None)
        .await
        .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_shows_slug"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_requires_existing_show(pool: PgPool) {
    let err = EventRepo::create(&pool, &new_event(424_242, None, 1))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_window_constraint(pool: PgPool) {
    let show = ShowRepo::create(&pool, &new_show("Antigone", false), "antigone", None)
        .await
        .unwrap();
    let mut event = new_event(show.id, None, 3);
    event.ends_at = Some(event.starts_at - Duration::hours(1));

    let err = EventRepo::create(&pool, &event).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("chk_show_events_window"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_show_cascades_to_events(pool: PgPool) {
    let show = ShowRepo::create(&pool, &new_show("Médée", false), "medee", None)
        .await
        .unwrap();
    let event = EventRepo::create(&pool, &new_event(show.id, None, 2))
        .await
        .unwrap();

    ShowRepo::delete(&pool, show.id).await.unwrap();
    assert!(EventRepo::find_by_id(&pool, event.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_venue_keeps_events(pool: PgPool) {
    let venue = VenueRepo::create(&pool, &new_venue("Théâtre des Célestins"))
        .await
        .unwrap();
    assert_eq!(venue.country, "France");

    let show = ShowRepo::create(&pool, &new_show("Ubu roi", false), "ubu-roi", None)
        .await
        .unwrap();
    let event = EventRepo::create(&pool, &new_event(show.id, Some(venue.id), 5))
        .await
        .unwrap();

    VenueRepo::delete(&pool, venue.id).await.unwrap();
    let event = EventRepo::find_by_id(&pool, event.id).await.unwrap().unwrap();
    assert_eq!(event.venue_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_update_and_filters(pool: PgPool) {
    let show = ShowRepo::create(&pool, &new_show("Tartuffe", false), "tartuffe", None)
        .await
        .unwrap();
    let soon = EventRepo::create(&pool, &new_event(show.id, None, 1))
        .await
        .unwrap();
    let later = EventRepo::create(&pool, &new_event(show.id, None, 30))
        .await
        .unwrap();

    let updated = EventRepo::update(
        &pool,
        soon.id,
        &UpdateShowEvent {
            venue_id: None,
            starts_at: None,
            ends_at: None,
            status: Some("sold_out".to_string()),
            ticket_url: None,
            capacity: None,
            price_cents: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "sold_out");
    assert_eq!(updated.price_cents, Some(1800));

    let window = EventFilter {
        show_id: Some(show.id),
        from: Some(Utc::now()),
        to: Some(Utc::now() + Duration::days(7)),
    };
    let events = EventRepo::list(&pool, &window).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, soon.id);

    let all = EventRepo::list(&pool, &EventFilter::default()).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![soon.id, later.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_agenda_only_lists_public_upcoming_events(pool: PgPool) {
    let venue = VenueRepo::create(&pool, &new_venue("La Croix-Rousse"))
        .await
        .unwrap();
    let public = ShowRepo::create(&pool, &new_show("Cyrano", true), "cyrano", None)
        .await
        .unwrap();
    let hidden = ShowRepo::create(&pool, &new_show("Brouillon", false), "brouillon", None)
        .await
        .unwrap();

    let upcoming = EventRepo::create(&pool, &new_event(public.id, Some(venue.id), 4))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event(public.id, None, -4))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event(hidden.id, None, 4))
        .await
        .unwrap();

    let agenda = EventRepo::agenda(&pool, Utc::now(), None, None).await.unwrap();
    assert_eq!(agenda.len(), 1);
    let entry = &agenda[0];
    assert_eq!(entry.id, upcoming.id);
    assert_eq!(entry.show_slug, "cyrano");
    assert_eq!(entry.venue_name.as_deref(), Some("La Croix-Rousse"));
    assert_eq!(entry.venue_city.as_deref(), Some("Lyon"));

    let filtered = EventRepo::agenda(&pool, Utc::now(), None, Some(hidden.id))
        .await
        .unwrap();
    assert!(filtered.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_show_lookup_by_slug(pool: PgPool) {
    ShowRepo::create(&pool, &new_show("Hamlet", true), "hamlet", None)
        .await
        .unwrap();
    ShowRepo::create(&pool, &new_show("Macbeth", false), "macbeth", None)
        .await
        .unwrap();

    assert!(ShowRepo::find_public_by_slug(&pool, "hamlet").await.unwrap().is_some());
    assert!(ShowRepo::find_public_by_slug(&pool, "macbeth").await.unwrap().is_none());
    assert_eq!(ShowRepo::list_public(&pool, 10).await.unwrap().len(), 1);
    assert_eq!(ShowRepo::list(&pool, Some("draft")).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Press releases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_press_release_needs_image(pool: PgPool) {
    let (input, slug) = new_release("Saison 2026", "saison-2026", true, false);
    let err = PressReleaseRepo::create(&pool, &input, &slug, None)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("chk_press_releases_public_image"));

    let (input, slug) = new_release("Saison 2026", "saison-2026", true, true);
    let release = PressReleaseRepo::create(&pool, &input, &slug, None)
        .await
        .unwrap();
    assert!(release.is_public);

    let (draft, slug) = new_release("Brouillon", "brouillon", false, false);
    PressReleaseRepo::create(&pool, &draft, &slug, None)
        .await
        .unwrap();

    let public = PressReleaseRepo::list_public(&pool, 10).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, release.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_image_url_does_not_satisfy_public_rule(pool: PgPool) {
    let (mut input, slug) = new_release("Blanc", "blanc", true, false);
    input.image_url = Some("  ".to_string());
    let err = PressReleaseRepo::create(&pool, &input, &slug, None)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("chk_press_releases_public_image"));

    let mut show = new_show("Sans visuel", true);
    show.image_url = Some(String::new());
    let err = ShowRepo::create(&pool, &show, "sans-visuel", None)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("chk_shows_public_image"));
}
