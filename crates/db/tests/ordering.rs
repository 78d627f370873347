//! Drag-and-drop ordering: append-at-end inserts and transactional reorder.

use rouge_core::reorder::{assign_positions, PositionUpdate};
use rouge_db::models::hero_slide::CreateHeroSlide;
use rouge_db::models::partner::CreatePartner;
use rouge_db::repositories::{HeroSlideRepo, PartnerRepo};
use sqlx::PgPool;

fn new_slide(title: &str) -> CreateHeroSlide {
    CreateHeroSlide {
        title: title.to_string(),
        subtitle: None,
        description: None,
        image_url: None,
        image_media_id: None,
        cta_label: None,
        cta_url: None,
        is_active: None,
    }
}

fn new_partner(name: &str) -> CreatePartner {
    CreatePartner {
        name: name.to_string(),
        description: None,
        website_url: None,
        logo_url: None,
        logo_media_id: None,
        is_active: Some(true),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_rows_are_appended(pool: PgPool) {
    let a = HeroSlideRepo::create(&pool, &new_slide("A")).await.unwrap();
    let b = HeroSlideRepo::create(&pool, &new_slide("B")).await.unwrap();
    let c = HeroSlideRepo::create(&pool, &new_slide("C")).await.unwrap();

    assert_eq!((a.position, b.position, c.position), (0, 1, 2));
    assert!(a.is_active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_persists_permutation(pool: PgPool) {
    let mut ids = Vec::new();
    for name in ["Région", "Ville", "DRAC", "Mécène"] {
        ids.push(PartnerRepo::create(&pool, &new_partner(name)).await.unwrap().id);
    }

    let requested = vec![ids[3], ids[1], ids[0], ids[2]];
    let current = PartnerRepo::list_ids(&pool).await.unwrap();
    let updates = assign_positions(&current, &requested).unwrap();
    assert_eq!(PartnerRepo::reorder(&pool, &updates).await.unwrap(), 4);

    let stored = PartnerRepo::list(&pool).await.unwrap();
    let order: Vec<i64> = stored.iter().map(|p| p.id).collect();
    let positions: Vec<i32> = stored.iter().map(|p| p.position).collect();
    assert_eq!(order, requested);
    assert_eq!(positions, vec![0, 1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_reorder_leaves_order_unchanged(pool: PgPool) {
    let a = HeroSlideRepo::create(&pool, &new_slide("A")).await.unwrap();
    let b = HeroSlideRepo::create(&pool, &new_slide("B")).await.unwrap();

    // The second row does not exist, so the whole batch must roll back.
    let updates = [
        PositionUpdate { id: b.id, position: 0 },
        PositionUpdate { id: 987_654, position: 1 },
    ];
    let err = HeroSlideRepo::reorder(&pool, &updates).await.unwrap_err();
    assert!(matches!(err, sqlx::Error::RowNotFound));

    let ids = HeroSlideRepo::list_ids(&pool).await.unwrap();
    assert_eq!(ids, vec![a.id, b.id]);
}
