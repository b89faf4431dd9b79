use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// Connect and create the tables every module depends on.
///
/// Module tables are created later by each module's `migrate`.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    run_core_migrations(&db).await?;

    Ok(db)
}

/// Execute schema statements in order, stopping at the first failure.
pub async fn execute_schema(db: &DatabaseConnection, statements: &[&str]) -> Result<(), DbErr> {
    for sql in statements {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

async fn run_core_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Users are owned by the host application; only the columns the
    // gamification records reference are created here.
    execute_schema(
        db,
        &[
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            // Polymorphic attachments (icons)
            r#"
            CREATE TABLE IF NOT EXISTS attachments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                model_type TEXT NOT NULL,
                model_id INTEGER NOT NULL,
                field TEXT NOT NULL,
                filename TEXT NOT NULL,
                path TEXT NOT NULL,
                url TEXT NOT NULL,
                content_type TEXT,
                size INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_attachments_owner ON attachments(model_type, model_id, field)",
        ],
    )
    .await?;

    tracing::debug!("Core tables ready");
    Ok(())
}
