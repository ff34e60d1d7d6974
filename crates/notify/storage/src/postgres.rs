//! Postgres token store.

use color_eyre::eyre::WrapErr as _;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

use crate::schema::profiles;
use crate::traits::TokenStore;

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Every non-null `profiles.fcm_token`.
fn device_tokens_query() -> profiles::BoxedQuery<'static, Pg, diesel::sql_types::Text> {
    profiles::table
        .filter(profiles::fcm_token.is_not_null())
        .select(profiles::fcm_token.assume_not_null())
        .into_boxed()
}

/// Reads device tokens straight from the `profiles` table.
#[derive(Clone)]
pub struct PgTokenStore {
    pool: PgPool,
}

impl PgTokenStore {
    /// Create a new Postgres store from a database URL.
    pub fn new(database_url: &str) -> color_eyre::eyre::Result<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .wrap_err("failed to create connection pool")?;

        Ok(Self { pool })
    }

    fn load_tokens(pool: &PgPool) -> color_eyre::eyre::Result<Vec<String>> {
        let mut conn = pool.get().wrap_err("failed to get database connection")?;

        device_tokens_query()
            .load::<String>(&mut conn)
            .wrap_err("failed to query device tokens")
    }
}

impl TokenStore for PgTokenStore {
    async fn device_tokens(&self) -> color_eyre::eyre::Result<Vec<String>> {
        let pool = self.pool.clone();

        let tokens = tokio::task::spawn_blocking(move || Self::load_tokens(&pool))
            .await
            .wrap_err("device token query panicked")??;

        tracing::debug!(count = tokens.len(), "loaded device tokens from postgres");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_only_registered_tokens() {
        let sql = diesel::debug_query::<Pg, _>(&device_tokens_query()).to_string();

        assert!(
            sql.starts_with(
                r#"SELECT "profiles"."fcm_token" FROM "profiles" WHERE ("profiles"."fcm_token" IS NOT NULL)"#
            ),
            "{sql}"
        );
        assert!(sql.ends_with("-- binds: []"), "{sql}");
    }
}
