use rusqlite::Connection;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::queries;
use crate::models::{Role, User};

/// Creates the initial accounts on a fresh database. A non-empty users
/// table is left untouched.
pub fn seed_users(conn: &Connection, config: &AppConfig) -> anyhow::Result<()> {
    if queries::count_users(conn)? > 0 {
        return Ok(());
    }

    let admin = User {
        id: Uuid::new_v4().to_string(),
        name: config.admin_name.clone(),
        email: config.admin_email.clone(),
        role: Role::Admin,
    };
    queries::insert_user(conn, &admin)?;
    tracing::info!("seeded admin user: {}", admin.email);

    if config.dev_mode {
        let demo = User {
            id: Uuid::new_v4().to_string(),
            name: "Demo User".to_string(),
            email: "demo@example.com".to_string(),
            role: Role::User,
        };
        queries::insert_user(conn, &demo)?;
        tracing::info!("seeded demo user: {}", demo.email);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn test_config(dev_mode: bool) -> AppConfig {
        AppConfig {
            port: 3000,
            database_url: ":memory:".to_string(),
            admin_email: "admin@test.local".to_string(),
            admin_name: "Test Admin".to_string(),
            dev_mode,
        }
    }

    #[test]
    fn test_seed_creates_admin_once() {
        let conn = db::init_db(":memory:").unwrap();
        let config = test_config(false);

        seed_users(&conn, &config).unwrap();
        seed_users(&conn, &config).unwrap();

        assert_eq!(queries::count_users(&conn).unwrap(), 1);
        let admin = queries::get_user_by_email(&conn, "admin@test.local")
            .unwrap()
            .unwrap();
        assert!(admin.role.is_admin());
    }

    #[test]
    fn test_seed_adds_demo_user_in_dev_mode() {
        let conn = db::init_db(":memory:").unwrap();
        seed_users(&conn, &test_config(true)).unwrap();

        assert_eq!(queries::count_users(&conn).unwrap(), 2);
        let demo = queries::get_user_by_email(&conn, "demo@example.com")
            .unwrap()
            .unwrap();
        assert!(!demo.role.is_admin());
    }

    #[test]
    fn test_seed_skips_populated_database() {
        let conn = db::init_db(":memory:").unwrap();
        let existing = User {
            id: "u-1".to_string(),
            name: "Existing".to_string(),
            email: "existing@example.com".to_string(),
            role: Role::User,
        };
        queries::insert_user(&conn, &existing).unwrap();

        seed_users(&conn, &test_config(false)).unwrap();

        assert_eq!(queries::count_users(&conn).unwrap(), 1);
        assert!(queries::get_user_by_email(&conn, "admin@test.local")
            .unwrap()
            .is_none());
    }
}
