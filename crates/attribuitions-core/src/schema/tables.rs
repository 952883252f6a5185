/// A table definition, executed once when a database file is created.
#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub sql: &'static str,
}

const TYPES: &str = r#"
CREATE TABLE IF NOT EXISTS types (
    _id     INTEGER PRIMARY KEY NOT NULL,
    name    TEXT
);
"#;

const LICENCES: &str = r#"
CREATE TABLE IF NOT EXISTS licences (
    _id     INTEGER PRIMARY KEY NOT NULL,
    name    TEXT DEFAULT 'Attribution 4.0 International (CC BY 4.0)',
    link    TEXT DEFAULT 'https://creativecommons.org/licenses/by/4.0/'
);
"#;

const CREDITS: &str = r#"
CREATE TABLE IF NOT EXISTS credits (
    _id         INTEGER PRIMARY KEY NOT NULL,
    name        TEXT,
    filename    TEXT,
    type_id     INTEGER NOT NULL DEFAULT 1,
    author      TEXT,
    link        TEXT,
    licence_id  INTEGER NOT NULL DEFAULT 1,
    FOREIGN KEY (type_id)
        REFERENCES types (_id)
            ON DELETE CASCADE
            ON UPDATE NO ACTION,
    FOREIGN KEY (licence_id)
        REFERENCES licences (_id)
            ON DELETE CASCADE
            ON UPDATE NO ACTION
);
"#;

/// Tables in creation order; `credits` references the other two.
pub const TABLES: &[Table] = &[
    Table {
        name: "types",
        sql: TYPES,
    },
    Table {
        name: "licences",
        sql: LICENCES,
    },
    Table {
        name: "credits",
        sql: CREDITS,
    },
];
