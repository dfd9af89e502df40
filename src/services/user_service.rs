use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::SignUpPayload;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto::{hash_password, verify_password};

const SELECT_USER: &str = r#"SELECT id, name, email, nickname, password_hash, role,
       total_quizzes, total_points, average_accuracy, created_at, updated_at
FROM users"#;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registers a new account. Email and nickname must be unique; both
    /// collisions surface as a user-facing conflict message.
    pub async fn sign_up(&self, payload: SignUpPayload) -> Result<User> {
        let email_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&payload.email)
                .fetch_one(&self.pool)
                .await?;
        if email_taken {
            return Err(Error::Conflict(
                "Email already in use. Please log in instead.".to_string(),
            ));
        }

        let nickname_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE nickname = $1)")
                .bind(&payload.nickname)
                .fetch_one(&self.pool)
                .await?;
        if nickname_taken {
            return Err(Error::Conflict(
                "Nickname already in use. Please choose another.".to_string(),
            ));
        }

        let password_hash = hash_password(&payload.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (name, email, nickname, password_hash, role)
               VALUES ($1, $2, $3, $4, 'user')
               RETURNING id, name, email, nickname, password_hash, role,
                         total_quizzes, total_points, average_accuracy, created_at, updated_at"#,
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.nickname)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(user_id = %user.id, "user account created");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        let Some(user) = user else {
            return Err(Error::Unauthorized(
                "User not found. Please sign up first.".to_string(),
            ));
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }

        Ok(user)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    /// Startup bootstrap: guarantees an admin account exists for the
    /// configured credentials. Does nothing when the email is already
    /// registered.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Ok(());
        }

        let password_hash = hash_password(password)?;
        sqlx::query(
            r#"INSERT INTO users (name, email, nickname, password_hash, role)
               VALUES ('Administrator', $1, 'admin', $2, 'admin')
               ON CONFLICT (nickname) DO NOTHING"#,
        )
        .bind(email)
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;

        tracing::info!(email, "admin account bootstrapped");
        Ok(())
    }
}
