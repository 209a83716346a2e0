use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::User;

const USER_COLUMNS: &str = "id, username, email, password_hash, dietary_preferences, created_at";

pub struct UserRepository;

impl UserRepository {
    pub async fn create(conn: &Connection, user: &User) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO users (id, username, email, password_hash, dietary_preferences, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                user.id.clone(),
                user.username.clone(),
                user.email.clone(),
                user.password_hash.clone(),
                serde_json::to_string(&user.dietary_preferences)?,
                user.created_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
        let mut rows = conn.query(&sql, params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn get_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
        let mut rows = conn.query(&sql, params![email]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn email_or_username_taken(
        conn: &Connection,
        email: &str,
        username: &str,
    ) -> Result<bool> {
        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM users WHERE email = ?1 OR username = ?2",
                params![email, username],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(row.get::<i64>(0)? > 0),
            None => Ok(false),
        }
    }

    fn row_to_user(row: &libsql::Row) -> Result<User> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            dietary_preferences: serde_json::from_str(&row.get::<String>(4)?).unwrap_or_default(),
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(5)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> Connection {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .expect("in-memory db");
        let conn = db.connect().expect("connect");
        crate::db::schema::init_schema(&conn).await.expect("schema");
        conn
    }

    #[tokio::test]
    async fn create_and_lookup_by_email() {
        let conn = setup_test_db().await;
        let user = User::new(
            "u1".to_string(),
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        UserRepository::create(&conn, &user).await.expect("create");

        let loaded = UserRepository::get_by_email(&conn, "alice@example.com")
            .await
            .expect("get")
            .expect("present");
        assert_eq!(loaded.id, "u1");
        assert_eq!(loaded.username, "alice");
    }

    #[tokio::test]
    async fn taken_check_covers_email_and_username() {
        let conn = setup_test_db().await;
        let user = User::new(
            "u1".to_string(),
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        UserRepository::create(&conn, &user).await.expect("create");

        assert!(UserRepository::email_or_username_taken(&conn, "alice@example.com", "other")
            .await
            .expect("check"));
        assert!(UserRepository::email_or_username_taken(&conn, "other@example.com", "alice")
            .await
            .expect("check"));
        assert!(
            !UserRepository::email_or_username_taken(&conn, "bob@example.com", "bob")
                .await
                .expect("check")
        );
    }
}
