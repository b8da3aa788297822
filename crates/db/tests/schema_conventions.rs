use sqlx::PgPool;

/// All `id` columns must be uuid with a server-side default.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_uuid(pool: PgPool) {
    let rows: Vec<(String, String, Option<String>)> = sqlx::query_as(
        "SELECT table_name, data_type, column_default
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty(), "Expected entity tables in the schema");
    for (table, data_type, column_default) in &rows {
        assert_eq!(data_type, "uuid", "Table {table}.id should be uuid, got {data_type}");
        let default = column_default
            .as_deref()
            .unwrap_or_else(|| panic!("Table {table}.id has no default"));
        assert!(
            default.contains("gen_random_uuid"),
            "Table {table}.id should default to gen_random_uuid(), got {default}"
        );
    }
}

/// Every table (except _sqlx_migrations) must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(&format!(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = '{table}'
                   AND column_name = '{col}'"
            ))
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// Every table must have an updated_at trigger wired to set_updated_at().
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_updated_at_trigger(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let has_trigger: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS (
                SELECT 1
                FROM information_schema.triggers
                WHERE event_object_table = '{table}'
                  AND action_statement LIKE '%set_updated_at%'
            )"
        ))
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_trigger.0, "Table {table} has no updated_at trigger");
    }
}

/// The trigger actually bumps updated_at past created_at.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger_fires(pool: PgPool) {
    let id: uuid::Uuid =
        sqlx::query_scalar("INSERT INTO webtoons (title) VALUES ('Trigger') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    sqlx::query("UPDATE webtoons SET title = 'Triggered' WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let (bumped,): (bool,) =
        sqlx::query_as("SELECT updated_at > created_at FROM webtoons WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(bumped, "updated_at should move past created_at on UPDATE");
}

/// No character varying columns should exist -- TEXT is preferred.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}

/// Every foreign key column must have a covering index (single-column or
/// leading column of a composite).
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_indexes(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT
             tc.table_name,
             kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name, kcu.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!fk_columns.is_empty(), "Expected FK columns in the schema");
    for (table, column) in &fk_columns {
        let has_index: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = '{table}'
                  AND indexdef LIKE '%({column}%'
            )"
        ))
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_index.0, "FK column {table}.{column} has no index");
    }
}

/// Every foreign key must carry an explicit ON DELETE rule; constraint
/// names follow the fk_* / uq_* conventions.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_constraint_rules_and_naming(pool: PgPool) {
    let fk_rules: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT
             rc.constraint_name,
             tc.table_name,
             rc.delete_rule
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
             ON rc.constraint_name = tc.constraint_name
             AND rc.constraint_schema = tc.table_schema
         WHERE rc.constraint_schema = 'public'
         ORDER BY tc.table_name, rc.constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!fk_rules.is_empty(), "Expected at least one FK constraint");
    for (constraint, table, delete_rule) in &fk_rules {
        assert!(
            constraint.starts_with("fk_"),
            "FK {constraint} on {table} should be named fk_*"
        );
        assert!(
            delete_rule == "CASCADE" || delete_rule == "SET NULL",
            "FK {constraint} on {table} has delete rule {delete_rule}; \
             expected an explicit CASCADE or SET NULL"
        );
    }

    let unique_names: Vec<(String,)> = sqlx::query_as(
        "SELECT tc.constraint_name
         FROM information_schema.table_constraints tc
         WHERE tc.constraint_schema = 'public'
           AND tc.constraint_type = 'UNIQUE'
         ORDER BY tc.constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!unique_names.is_empty(), "Expected unique constraints");
    for (name,) in &unique_names {
        assert!(name.starts_with("uq_"), "Unique constraint {name} should be named uq_*");
    }
}
