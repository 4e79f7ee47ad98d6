/// SQL flavours the customer table is created for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Postgres,
    Sqlite,
}

impl SqlDialect {
    /// Match a driver's backend name ("PostgreSQL", "SQLite", ...)
    pub fn from_backend_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name.contains("postgres") {
            Some(SqlDialect::Postgres)
        } else if name.contains("sqlite") {
            Some(SqlDialect::Sqlite)
        } else {
            None
        }
    }

    /// DDL for the `customer` table.
    ///
    /// The unique constraint on `email` backs up the service's
    /// check-then-insert, which is not atomic on its own.
    pub fn create_customer_table(&self) -> &'static str {
        match self {
            SqlDialect::Postgres => {
                r#"
                CREATE TABLE IF NOT EXISTS customer (
                    id BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    password TEXT NOT NULL,
                    age INT NOT NULL,
                    gender TEXT NOT NULL,
                    profile_image_id TEXT,
                    CONSTRAINT customer_email_unique UNIQUE (email),
                    CONSTRAINT customer_profile_image_id_unique UNIQUE (profile_image_id)
                )
                "#
            }
            SqlDialect::Sqlite => {
                r#"
                CREATE TABLE IF NOT EXISTS customer (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    password TEXT NOT NULL,
                    age INTEGER NOT NULL,
                    gender TEXT NOT NULL,
                    profile_image_id TEXT,
                    CONSTRAINT customer_email_unique UNIQUE (email),
                    CONSTRAINT customer_profile_image_id_unique UNIQUE (profile_image_id)
                )
                "#
            }
        }
    }
}
