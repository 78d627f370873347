//! Repository for the `newsletter_subscribers` table.

use sqlx::PgPool;

use crate::models::contact::NewsletterSubscriber;

const COLUMNS: &str = "id, email, source, subscribed_at, unsubscribed_at, created_at, updated_at";

pub struct NewsletterRepo;

impl NewsletterRepo {
    /// Subscribe an address. Re-subscribing a previously unsubscribed
    /// address reactivates it; subscribing twice is a no-op.
    pub async fn subscribe(
        pool: &PgPool,
        email: &str,
        source: Option<&str>,
    ) -> Result<NewsletterSubscriber, sqlx::Error> {
        let query = format!(
            "INSERT INTO newsletter_subscribers (email, source) VALUES (LOWER($1), $2) \
             ON CONFLICT (email) DO UPDATE SET \
                 subscribed_at = CASE WHEN newsletter_subscribers.unsubscribed_at IS NULL \
                                      THEN newsletter_subscribers.subscribed_at ELSE NOW() END, \
                 unsubscribed_at = NULL, \
                 source = COALESCE(newsletter_subscribers.source, EXCLUDED.source) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsletterSubscriber>(&query)
            .bind(email)
            .bind(source)
            .fetch_one(pool)
            .await
    }

    /// Returns `false` when the address was not subscribed.
    pub async fn unsubscribe(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE newsletter_subscribers SET unsubscribed_at = NOW() \
             WHERE email = LOWER($1) AND unsubscribed_at IS NULL",
        )
        .bind(email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active subscribers, oldest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<NewsletterSubscriber>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM newsletter_subscribers \
             WHERE unsubscribed_at IS NULL ORDER BY subscribed_at, id"
        );
        sqlx::query_as::<_, NewsletterSubscriber>(&query)
            .fetch_all(pool)
            .await
    }
}
