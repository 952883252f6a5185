use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{Error, OperationContext, Result};
use crate::model::query::search_pattern;
use crate::model::{AssetType, Attribuition, Licence, SortOrder};

use super::seed;
use super::tables::TABLES;

/// Upper bound on waiting for a lock held by another process on the same
/// file. Also bounds the one-time schema initialisation.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The storage engine: sole owner of the SQLite connection.
///
/// Every method holds a single engine-wide mutex for its full duration, so
/// reads and writes are serialized; no two statements ever run concurrently
/// against the connection.
#[derive(Debug)]
pub struct Storage {
    conn: Mutex<Option<Connection>>,
}

impl Storage {
    /// Open the database at `path`.
    ///
    /// When no file exists yet, an empty one is created and the tables are
    /// created and seeded exactly once. An existing file is opened as is.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let needs_init = match fs::metadata(path) {
            Ok(_) => false,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::File::create(path)?;
                true
            }
            Err(err) => return Err(err.into()),
        };

        let conn = Connection::open(path).during("open database")?;
        log::debug!("Opened database {}", path.display());

        let storage = Self::bootstrap(conn, needs_init);
        if storage.is_err() && needs_init {
            // Leave no half-initialised file behind, or it would never be seeded.
            if let Err(err) = fs::remove_file(path) {
                log::warn!("Could not remove {}: {}", path.display(), err);
            }
        }
        storage
    }

    /// Open an in-memory database (for tests). Always initialised.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().during("open database")?;
        Self::bootstrap(conn, true)
    }

    fn bootstrap(mut conn: Connection, needs_init: bool) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .during("configure connection")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .during("configure connection")?;

        if needs_init {
            initialize(&mut conn)?;
        }

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Release the connection. Closing twice is a no-op.
    ///
    /// A failure here is [`Error::Unrecoverable`]; callers are expected to
    /// terminate rather than carry on.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.lock();
        let Some(conn) = guard.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                log::debug!("Database closed");
                Ok(())
            }
            Err((conn, err)) => {
                *guard = Some(conn);
                Err(Error::Unrecoverable(format!("error closing database: {err}")))
            }
        }
    }

    /// Whether [`Storage::close`] has already released the connection.
    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    // A panic mid-statement cannot leave the connection in a state the
    // next statement depends on, so a poisoned lock is simply reclaimed.
    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.lock();
        let conn = guard.as_ref().ok_or(Error::Closed)?;
        f(conn)
    }
}

fn initialize(conn: &mut Connection) -> Result<()> {
    for table in TABLES {
        log::info!("Creating table {}", table.name);
        conn.execute_batch(table.sql).during("create table")?;
    }

    let tx = conn.transaction().during("begin seeding")?;
    {
        let mut insert_type = tx
            .prepare("INSERT INTO types (name) VALUES (?1)")
            .during("prepare to seed types")?;
        for name in seed::TYPES {
            insert_type.execute(params![name]).during("seed types")?;
        }

        let mut insert_licence = tx
            .prepare("INSERT INTO licences (name, link) VALUES (?1, ?2)")
            .during("prepare to seed licences")?;
        for (name, link) in seed::LICENCES {
            insert_licence
                .execute(params![name, link])
                .during("seed licences")?;
        }
    }
    tx.commit().during("commit seeding")?;

    log::info!(
        "Seeded {} types and {} licences",
        seed::TYPES.len(),
        seed::LICENCES.len()
    );
    Ok(())
}

// Type CRUD
impl Storage {
    /// Insert a type, returning its new id.
    pub fn add_type(&self, name: &str) -> Result<i64> {
        self.with_connection(|conn| {
            conn.execute("INSERT INTO types (name) VALUES (?1)", [name])
                .during("exec to add type")?;
            log::debug!("Added type {}", name);
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn update_type(&self, id: i64, name: &str) -> Result<()> {
        self.with_connection(|conn| {
            let changed = conn
                .execute("UPDATE types SET name = ?1 WHERE _id = ?2", params![name, id])
                .during("exec to update type")?;
            expect_row("type", id, changed)
        })
    }

    /// Delete a type. Attribuitions of that type are removed by the
    /// foreign-key cascade.
    pub fn delete_type(&self, id: i64) -> Result<()> {
        self.with_connection(|conn| {
            let changed = conn
                .execute("DELETE FROM types WHERE _id = ?1", [id])
                .during("exec to delete type")?;
            expect_row("type", id, changed)
        })
    }

    /// All types, ordered by name case-insensitively.
    pub fn list_types(&self) -> Result<Vec<AssetType>> {
        self.with_connection(|conn| {
            let mut stmt = conn
                .prepare("SELECT _id, name FROM types ORDER BY name COLLATE NOCASE ASC")
                .during("read rows from types")?;

            let types = stmt
                .query_map([], |row| {
                    Ok(AssetType {
                        id: row.get(0)?,
                        name: text(row, 1)?,
                    })
                })
                .during("read rows from types")?
                .collect::<rusqlite::Result<Vec<_>>>()
                .during("read row from types")?;

            Ok(types)
        })
    }

    pub fn count_types(&self) -> Result<usize> {
        self.count("types")
    }
}

// Licence CRUD
impl Storage {
    /// Insert a licence, returning its new id.
    pub fn add_licence(&self, name: &str, link: &str) -> Result<i64> {
        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO licences (name, link) VALUES (?1, ?2)",
                params![name, link],
            )
            .during("exec to add licence")?;
            log::debug!("Added licence {}", name);
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn update_licence(&self, id: i64, name: &str, link: &str) -> Result<()> {
        self.with_connection(|conn| {
            let changed = conn
                .execute(
                    "UPDATE licences SET name = ?1, link = ?2 WHERE _id = ?3",
                    params![name, link, id],
                )
                .during("exec to update licence")?;
            expect_row("licence", id, changed)
        })
    }

    /// Delete a licence, cascading to the attribuitions that use it.
    pub fn delete_licence(&self, id: i64) -> Result<()> {
        self.with_connection(|conn| {
            let changed = conn
                .execute("DELETE FROM licences WHERE _id = ?1", [id])
                .during("exec to delete licence")?;
            expect_row("licence", id, changed)
        })
    }

    /// All licences, ordered by name case-insensitively.
    pub fn list_licences(&self) -> Result<Vec<Licence>> {
        self.with_connection(|conn| {
            let mut stmt = conn
                .prepare("SELECT _id, name, link FROM licences ORDER BY name COLLATE NOCASE ASC")
                .during("read rows from licences")?;

            let licences = stmt
                .query_map([], |row| {
                    Ok(Licence {
                        id: row.get(0)?,
                        name: text(row, 1)?,
                        link: text(row, 2)?,
                    })
                })
                .during("read rows from licences")?
                .collect::<rusqlite::Result<Vec<_>>>()
                .during("read row from licences")?;

            Ok(licences)
        })
    }

    pub fn count_licences(&self) -> Result<usize> {
        self.count("licences")
    }
}

// Attribuition CRUD
impl Storage {
    /// Insert an attribuition, returning its new id.
    ///
    /// `kind` and `licence` are resolved by exact name in the same statement.
    /// Unknown names fail with [`Error::UnknownType`] / [`Error::UnknownLicence`]
    /// and nothing is written. `id` and `licence_url` are ignored.
    pub fn add_attribuition(&self, credit: &Attribuition) -> Result<i64> {
        self.with_connection(|conn| {
            let inserted = conn
                .execute(
                    "INSERT INTO credits (name, filename, author, link, type_id, licence_id)
                     SELECT ?1, ?2, ?3, ?4, t._id, l._id
                     FROM types t, licences l
                     WHERE t.name = ?5 AND l.name = ?6
                     LIMIT 1",
                    params![
                        credit.name,
                        credit.filename,
                        credit.author,
                        credit.link,
                        credit.kind,
                        credit.licence,
                    ],
                )
                .during("exec to add attribuition")?;

            if inserted == 0 {
                let missing = missing_reference(conn, &credit.kind, &credit.licence)?;
                return Err(missing.unwrap_or_else(|| Error::UnknownType(credit.kind.clone())));
            }

            log::debug!("Added attribuition {}", credit.name);
            Ok(conn.last_insert_rowid())
        })
    }

    /// Replace every mutable field of the attribuition with id `credit.id`.
    pub fn update_attribuition(&self, credit: &Attribuition) -> Result<()> {
        self.with_connection(|conn| {
            let changed = conn
                .execute(
                    "UPDATE credits SET
                        name = ?1,
                        filename = ?2,
                        author = ?3,
                        link = ?4,
                        type_id = (SELECT _id FROM types WHERE name = ?5),
                        licence_id = (SELECT _id FROM licences WHERE name = ?6)
                     WHERE _id = ?7
                       AND EXISTS (SELECT 1 FROM types WHERE name = ?5)
                       AND EXISTS (SELECT 1 FROM licences WHERE name = ?6)",
                    params![
                        credit.name,
                        credit.filename,
                        credit.author,
                        credit.link,
                        credit.kind,
                        credit.licence,
                        credit.id,
                    ],
                )
                .during("exec to update attribuition")?;

            if changed == 0 {
                if let Some(missing) = missing_reference(conn, &credit.kind, &credit.licence)? {
                    return Err(missing);
                }
            }
            expect_row("attribuition", credit.id, changed)
        })
    }

    pub fn delete_attribuition(&self, id: i64) -> Result<()> {
        self.with_connection(|conn| {
            let changed = conn
                .execute("DELETE FROM credits WHERE _id = ?1", [id])
                .during("exec to delete attribuition")?;
            expect_row("attribuition", id, changed)
        })
    }

    /// Attribuitions joined with their type and licence, ordered by name
    /// case-insensitively in `order` direction.
    ///
    /// A non-blank `search` is split on whitespace and its tokens must appear,
    /// in order, in the name or the author. Matching follows SQLite `LIKE`:
    /// ASCII letters compare case-insensitively.
    pub fn find_attribuitions(&self, order: SortOrder, search: &str) -> Result<Vec<Attribuition>> {
        let pattern = search_pattern(search);
        let filter = if pattern.is_some() {
            "WHERE c.name LIKE ?1 OR c.author LIKE ?1"
        } else {
            ""
        };
        let sql = format!(
            "SELECT c._id, c.name, c.filename, c.author, c.link,
                    t.name AS type,
                    l.name AS licence,
                    l.link AS licence_link
             FROM credits c
             LEFT JOIN types t ON t._id = c.type_id
             LEFT JOIN licences l ON l._id = c.licence_id
             {}
             ORDER BY c.name COLLATE NOCASE {}",
            filter,
            order.as_sql()
        );

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql).during("read rows from attribuitions")?;

            let credits = stmt
                .query_map(params_from_iter(pattern.iter()), row_to_attribuition)
                .during("read rows from attribuitions")?
                .collect::<rusqlite::Result<Vec<_>>>()
                .during("read row from attribuitions")?;

            Ok(credits)
        })
    }

    fn count(&self, table: &'static str) -> Result<usize> {
        self.with_connection(|conn| {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })
                .during("count rows")?;
            Ok(usize::try_from(count).unwrap_or(0))
        })
    }
}

fn row_to_attribuition(row: &Row<'_>) -> rusqlite::Result<Attribuition> {
    Ok(Attribuition {
        id: row.get(0)?,
        name: text(row, 1)?,
        filename: text(row, 2)?,
        author: text(row, 3)?,
        link: text(row, 4)?,
        kind: text(row, 5)?,
        licence: text(row, 6)?,
        licence_url: text(row, 7)?,
    })
}

/// Nullable TEXT column as an owned string, `NULL` mapping to empty.
fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn expect_row(entity: &'static str, id: i64, changed: usize) -> Result<()> {
    if changed == 0 {
        return Err(Error::NotFound { entity, id });
    }
    log::debug!("Changed {} {}", entity, id);
    Ok(())
}

/// Which referenced name, if any, does not resolve to a row.
fn missing_reference(conn: &Connection, kind: &str, licence: &str) -> Result<Option<Error>> {
    if !name_exists(conn, "SELECT 1 FROM types WHERE name = ?1", kind)? {
        return Ok(Some(Error::UnknownType(kind.to_string())));
    }
    if !name_exists(conn, "SELECT 1 FROM licences WHERE name = ?1", licence)? {
        return Ok(Some(Error::UnknownLicence(licence.to_string())));
    }
    Ok(None)
}

fn name_exists(conn: &Connection, sql: &str, name: &str) -> Result<bool> {
    let found = conn
        .query_row(sql, [name], |_| Ok(()))
        .optional()
        .during("resolve reference")?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> Storage {
        Storage::open_in_memory().unwrap()
    }

    fn credit(name: &str, author: &str) -> Attribuition {
        Attribuition::new(name, "file.ogg", author, "http://none")
            .with_type("Music")
            .with_licence("MIT")
    }

    #[test]
    fn test_open_in_memory_seeds_lookups() {
        let db = storage();
        assert_eq!(db.count_types().unwrap(), seed::TYPES.len());
        assert_eq!(db.count_licences().unwrap(), seed::LICENCES.len());
        assert!(db.find_attribuitions(SortOrder::Asc, "").unwrap().is_empty());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = storage();
        let enabled: i64 = db
            .with_connection(|conn| {
                conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))
                    .during("read pragma")
            })
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_type_round_trip() {
        let db = storage();
        let id = db.add_type("API").unwrap();
        assert!(db.list_types().unwrap().contains(&AssetType::new(id, "API")));

        db.update_type(id, "Web API").unwrap();
        let types = db.list_types().unwrap();
        assert!(types.contains(&AssetType::new(id, "Web API")));
        assert!(!types.iter().any(|t| t.name == "API"));

        db.delete_type(id).unwrap();
        assert!(!db.list_types().unwrap().iter().any(|t| t.id == id));
    }

    #[test]
    fn test_list_types_case_insensitive_order() {
        let db = storage();
        db.add_type("aardvark").unwrap();
        db.add_type("Zebra").unwrap();
        db.add_type("zeppelin").unwrap();

        let names: Vec<String> = db.list_types().unwrap().into_iter().map(|t| t.name).collect();
        let mut expected = names.clone();
        expected.sort_by_key(|name| name.to_lowercase());
        assert_eq!(names, expected);
        assert_eq!(names.first().map(String::as_str), Some("3D Model"));
        assert_eq!(names.get(1).map(String::as_str), Some("aardvark"));
    }

    #[test]
    fn test_update_missing_row_is_not_found() {
        let db = storage();
        assert!(matches!(
            db.update_type(9999, "Nope"),
            Err(Error::NotFound { entity: "type", id: 9999 })
        ));
        assert!(matches!(
            db.delete_licence(9999),
            Err(Error::NotFound { entity: "licence", .. })
        ));
        assert!(matches!(
            db.delete_attribuition(1),
            Err(Error::NotFound { entity: "attribuition", .. })
        ));
    }

    #[test]
    fn test_add_attribuition_resolves_names() {
        let db = storage();
        db.add_attribuition(&credit("Test", "Ze")).unwrap();

        let found = db.find_attribuitions(SortOrder::Asc, "").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, "Music");
        assert_eq!(found[0].licence, "MIT");
        assert_eq!(found[0].licence_url, "https://opensource.org/license/mit/");
        assert_eq!(found[0].author, "Ze");
        assert_eq!(found[0].link, "http://none");
    }

    #[test]
    fn test_add_attribuition_unknown_references() {
        let db = storage();
        let err = db
            .add_attribuition(&credit("Test", "Ze").with_type("Hologram"))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownType(ref name) if name == "Hologram"));

        let err = db
            .add_attribuition(&credit("Test", "Ze").with_licence("Nope"))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownLicence(ref name) if name == "Nope"));

        assert!(db.find_attribuitions(SortOrder::Asc, "").unwrap().is_empty());
    }

    #[test]
    fn test_update_attribuition_replaces_fields() {
        let db = storage();
        let id = db.add_attribuition(&credit("Test", "Ze")).unwrap();

        let changed = Attribuition::new("_Test", "_file", "_Ze", "_http://none")
            .with_id(id)
            .with_type("Plugin")
            .with_licence("Beerware");
        db.update_attribuition(&changed).unwrap();

        let found = db.find_attribuitions(SortOrder::Asc, "").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "_Test");
        assert_eq!(found[0].filename, "_file");
        assert_eq!(found[0].kind, "Plugin");
        assert_eq!(found[0].licence, "Beerware");

        let unknown = changed.clone().with_licence("Nope");
        assert!(matches!(
            db.update_attribuition(&unknown),
            Err(Error::UnknownLicence(_))
        ));
        let missing = changed.with_id(id + 100);
        assert!(matches!(
            db.update_attribuition(&missing),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_find_order_and_search() {
        let db = storage();
        db.add_attribuition(&credit("bravo", "Ann")).unwrap();
        db.add_attribuition(&credit("Alpha", "Bob")).unwrap();
        db.add_attribuition(&credit("charlie", "abcdef")).unwrap();

        let asc: Vec<String> = db
            .find_attribuitions(SortOrder::Asc, "")
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(asc, vec!["Alpha", "bravo", "charlie"]);

        let desc: Vec<String> = db
            .find_attribuitions(SortOrder::Desc, "")
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(desc, vec!["charlie", "bravo", "Alpha"]);

        let by_author = db.find_attribuitions(SortOrder::Asc, "cde").unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].name, "charlie");

        // LIKE is ASCII case-insensitive
        let upper = db.find_attribuitions(SortOrder::Asc, "ALPHA").unwrap();
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn test_search_tokens_match_in_order() {
        let db = storage();
        db.add_attribuition(&credit("Space Ship Hull", "Ze")).unwrap();

        assert_eq!(
            db.find_attribuitions(SortOrder::Asc, "space hull").unwrap().len(),
            1
        );
        assert!(db
            .find_attribuitions(SortOrder::Asc, "hull space")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_delete_type_cascades() {
        let db = storage();
        db.add_attribuition(&credit("Song", "Ze")).unwrap();
        db.add_attribuition(&credit("Mesh", "Ze").with_type("3D Model"))
            .unwrap();

        let music = db
            .list_types()
            .unwrap()
            .into_iter()
            .find(|t| t.name == "Music")
            .unwrap();
        db.delete_type(music.id).unwrap();

        let remaining = db.find_attribuitions(SortOrder::Asc, "").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Mesh");
    }

    #[test]
    fn test_close_is_idempotent() {
        let db = storage();
        db.close().unwrap();
        assert!(db.is_closed());
        db.close().unwrap();
        assert!(matches!(db.list_types(), Err(Error::Closed)));
    }
}
