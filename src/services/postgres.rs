use crate::models::{Connection, ConnectionStatus, MatchBreakdown};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// PostgreSQL client for connection requests between users
///
/// Tracks pending, accepted, rejected and blocked connections. Blocked ids
/// feed the exclusion list of the recommendation pipeline.
pub struct PostgresClient {
    pool: PgPool,
}

const CONNECTION_COLUMNS: &str = "id, from_user_id, to_user_id, status, match_score, shared_interests, shared_goals, created_at, updated_at";

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a client whose pool connects on first use
    ///
    /// Migrations are not run.
    pub fn connect_lazy(database_url: &str, acquire_timeout_secs: u64) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
            idle_timeout_secs.unwrap_or(600),
        )
        .await
    }

    /// Create a pending connection request
    ///
    /// Fails with `Conflict` when either user has blocked the other or the
    /// same request is already pending.
    pub async fn send_request(
        &self,
        from_user_id: &str,
        to_user_id: &str,
    ) -> Result<Connection, PostgresError> {
        if from_user_id == to_user_id {
            return Err(PostgresError::InvalidInput("Cannot connect with yourself".to_string()));
        }

        if self.is_blocked_between(from_user_id, to_user_id).await? {
            return Err(PostgresError::Conflict(format!(
                "Block exists between {} and {}",
                from_user_id, to_user_id
            )));
        }

        let query = format!(
            r#"
            INSERT INTO connections (id, from_user_id, to_user_id, status, match_score, created_at)
            VALUES ($1, $2, $3, 'pending', 0, NOW())
            ON CONFLICT (from_user_id, to_user_id) WHERE status = 'pending'
            DO NOTHING
            RETURNING {}
            "#,
            CONNECTION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(from_user_id)
            .bind(to_user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                PostgresError::Conflict(format!(
                    "Request {} -> {} already pending",
                    from_user_id, to_user_id
                ))
            })?;

        tracing::debug!("Connection requested: {} -> {}", from_user_id, to_user_id);

        Ok(connection_from_row(&row)?)
    }

    /// Whether either user has blocked the other
    pub async fn is_blocked_between(&self, user_a: &str, user_b: &str) -> Result<bool, PostgresError> {
        let query = r#"
            SELECT EXISTS (
                SELECT 1 FROM connections
                WHERE status = 'blocked'
                  AND ((from_user_id = $1 AND to_user_id = $2)
                    OR (from_user_id = $2 AND to_user_id = $1))
            ) AS blocked
        "#;

        let row = sqlx::query(query)
            .bind(user_a)
            .bind(user_b)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("blocked")?)
    }

    /// Look up a connection by id
    pub async fn get_connection(&self, id: Uuid) -> Result<Connection, PostgresError> {
        let query = format!("SELECT {} FROM connections WHERE id = $1", CONNECTION_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Connection {} not found", id)))?;

        Ok(connection_from_row(&row)?)
    }

    /// Accept a pending request, storing the score computed for the pair
    pub async fn accept(
        &self,
        id: Uuid,
        breakdown: &MatchBreakdown,
    ) -> Result<Connection, PostgresError> {
        let query = format!(
            r#"
            UPDATE connections
            SET status = 'accepted',
                match_score = $2,
                shared_interests = $3,
                shared_goals = $4,
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            CONNECTION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(breakdown.score as i16)
            .bind(&breakdown.shared_interests)
            .bind(&breakdown.shared_goals)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Pending connection {} not found", id)))?;

        tracing::info!("Connection {} accepted with score {}", id, breakdown.score);

        Ok(connection_from_row(&row)?)
    }

    /// Reject a pending request
    pub async fn reject(&self, id: Uuid) -> Result<Connection, PostgresError> {
        let query = format!(
            r#"
            UPDATE connections
            SET status = 'rejected', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            CONNECTION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Pending connection {} not found", id)))?;

        Ok(connection_from_row(&row)?)
    }

    /// Pending requests addressed to a user, newest first
    pub async fn pending_for(&self, user_id: &str) -> Result<Vec<Connection>, PostgresError> {
        let query = format!(
            r#"
            SELECT {}
            FROM connections
            WHERE to_user_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "#,
            CONNECTION_COLUMNS
        );

        let rows = sqlx::query(&query).bind(user_id).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| connection_from_row(row).map_err(PostgresError::from))
            .collect()
    }

    /// Ids of users with an accepted connection to this user, in either direction
    pub async fn connections_of(&self, user_id: &str) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT DISTINCT
                CASE WHEN from_user_id = $1 THEN to_user_id ELSE from_user_id END AS partner_id
            FROM connections
            WHERE status = 'accepted' AND (from_user_id = $1 OR to_user_id = $1)
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(|row| row.get("partner_id")).collect())
    }

    /// Block a user
    ///
    /// Uses INSERT ... ON CONFLICT so repeated blocks are idempotent.
    pub async fn block(&self, from_user_id: &str, to_user_id: &str) -> Result<(), PostgresError> {
        if from_user_id == to_user_id {
            return Err(PostgresError::InvalidInput("Cannot block yourself".to_string()));
        }

        let query = r#"
            INSERT INTO connections (id, from_user_id, to_user_id, status, match_score, created_at)
            VALUES ($1, $2, $3, 'blocked', 0, NOW())
            ON CONFLICT (from_user_id, to_user_id) WHERE status = 'blocked'
            DO NOTHING
        "#;

        sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(from_user_id)
            .bind(to_user_id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("User {} blocked {}", from_user_id, to_user_id);

        Ok(())
    }

    /// Remove a block; returns whether one existed
    pub async fn unblock(&self, from_user_id: &str, to_user_id: &str) -> Result<bool, PostgresError> {
        let query = r#"
            DELETE FROM connections
            WHERE from_user_id = $1 AND to_user_id = $2 AND status = 'blocked'
        "#;

        let result = sqlx::query(query)
            .bind(from_user_id)
            .bind(to_user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Ids of users blocked by this user
    pub async fn blocked_ids(&self, user_id: &str) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT to_user_id
            FROM connections
            WHERE from_user_id = $1 AND status = 'blocked'
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let blocked: Vec<String> = rows.iter().map(|row| row.get("to_user_id")).collect();

        tracing::debug!("User {} has blocked {} users", user_id, blocked.len());

        Ok(blocked)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn connection_from_row(row: &PgRow) -> Result<Connection, sqlx::Error> {
    Ok(Connection {
        id: row.try_get("id")?,
        from_user_id: row.try_get("from_user_id")?,
        to_user_id: row.try_get("to_user_id")?,
        status: row.try_get::<ConnectionStatus, _>("status")?,
        match_score: row.try_get("match_score")?,
        shared_interests: row.try_get("shared_interests")?,
        shared_goals: row.try_get("shared_goals")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
