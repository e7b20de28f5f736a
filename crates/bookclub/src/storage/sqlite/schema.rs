//! SQLite schema definitions and SQL statements.
//!
//! The table name comes from configuration, so statements are built by pure
//! functions instead of being constants. No I/O happens here.

/// Quotes a table name as an SQLite identifier.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQL statement to create the signups table.
pub fn create_table(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {table} (
    partition_key TEXT NOT NULL,
    row_key TEXT NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    genre TEXT NOT NULL,
    submitted_at TEXT NOT NULL,
    PRIMARY KEY (partition_key, row_key)
);
"#,
        table = quote_identifier(table)
    )
}

/// Plain insert: a primary key collision is an error, never an overwrite.
pub fn insert_signup(table: &str) -> String {
    format!(
        r#"
INSERT INTO {table} (partition_key, row_key, name, email, genre, submitted_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#,
        table = quote_identifier(table)
    )
}

pub fn select_signup(table: &str) -> String {
    format!(
        r#"
SELECT partition_key, row_key, name, email, genre, submitted_at
FROM {table}
WHERE partition_key = ?1 AND row_key = ?2
"#,
        table = quote_identifier(table)
    )
}

pub fn select_signups_by_partition(table: &str) -> String {
    format!(
        r#"
SELECT partition_key, row_key, name, email, genre, submitted_at
FROM {table}
WHERE partition_key = ?1
ORDER BY row_key ASC
"#,
        table = quote_identifier(table)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_has_composite_primary_key() {
        let sql = create_table("BookClubSignups");
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS \"BookClubSignups\""));
        assert!(sql.contains("PRIMARY KEY (partition_key, row_key)"));
    }

    #[test]
    fn test_insert_is_not_an_upsert() {
        let sql = insert_signup("BookClubSignups");
        assert!(sql.contains("INSERT INTO"));
        assert!(!sql.contains("OR REPLACE"));
        assert!(!sql.contains("ON CONFLICT"));
    }

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_select_by_partition_orders_by_row_key() {
        assert!(select_signups_by_partition("t").contains("ORDER BY row_key ASC"));
    }
}
