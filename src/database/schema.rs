/// Table holding user records
pub const USERS_TABLE: &str = "users";

/// Created on startup when missing. Column names are referenced by `filter::FilterField::column`.
pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS "users" (
        "id"          TEXT    NOT NULL PRIMARY KEY,
        "firstname"   TEXT    NOT NULL,
        "secondname"  TEXT    NOT NULL,
        "age"         INTEGER NOT NULL,
        "x"           REAL    NOT NULL,
        "y"           REAL    NOT NULL,
        "random_key"  TEXT    NOT NULL
    )
"#;
