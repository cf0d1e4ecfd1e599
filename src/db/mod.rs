//! Database connection pool and repositories.

pub mod attendance;
pub mod department;

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Create a database connection pool.
pub async fn connect(conn_str: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(conn_str).await
}

/// Test database connection.
#[allow(dead_code)]
pub async fn test_connection(conn: &DatabaseConnection) -> Result<(), DbErr> {
    conn.ping().await
}
