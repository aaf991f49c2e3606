//! Embedded persistence for the two registry collections.
//!
//! The store owns a single SQLite connection, opened once at startup and
//! reused for every request. Uniqueness of location and child names is
//! enforced here at the application layer (an existence check before each
//! insert), not by storage-layer constraints; the check and the insert are
//! not atomic across concurrent requests, which is acceptable at this
//! system's scale. The child insert and its good-count increment do share
//! one transaction so a registration can never half-apply.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Behavior, Child, Coordinates, Location};

/// Persistent registry of locations and children.
pub struct Store {
    connection: Connection,
}

impl Store {
    /// Open (or create) the registry database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let connection = Connection::open(path)?;
        debug!(path = %path.display(), "opened registry database");
        Self::from_connection(connection)
    }

    /// Open an in-memory registry. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> Result<Self> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS locations (
                id            TEXT PRIMARY KEY,
                name          TEXT NOT NULL,
                lat           REAL NOT NULL,
                lon           REAL NOT NULL,
                good_children INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS children (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                behavior    TEXT NOT NULL,
                location_id TEXT NOT NULL
            );",
        )?;
        Ok(Self { connection })
    }

    /// Create a location with a zero good-count.
    ///
    /// Fails with [`Error::DuplicateLocation`] when the (case-sensitive)
    /// name is already registered.
    pub fn create_location(&mut self, name: &str, coordinates: Coordinates) -> Result<Location> {
        if self.location_by_name(name)?.is_some() {
            return Err(Error::DuplicateLocation {
                name: name.to_string(),
            });
        }

        let location = Location::new(name, coordinates);
        self.connection.execute(
            "INSERT INTO locations (id, name, lat, lon, good_children) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                location.id,
                location.name,
                location.coordinates.lat,
                location.coordinates.lon,
                location.good_children,
            ],
        )?;
        debug!(id = %location.id, name = %location.name, "location created");
        Ok(location)
    }

    /// Register a child at an existing location.
    ///
    /// Checks run in order: the referenced location must exist, then the
    /// child name must be unused. A good child increments the referenced
    /// location's good-count by exactly one, in the same transaction as the
    /// insert.
    pub fn register_child(
        &mut self,
        name: &str,
        behavior: Behavior,
        location_id: &str,
    ) -> Result<Child> {
        if self.location(location_id)?.is_none() {
            return Err(Error::UnknownLocation {
                id: location_id.to_string(),
            });
        }
        if self.child_by_name(name)?.is_some() {
            return Err(Error::DuplicateChild {
                name: name.to_string(),
            });
        }

        let child = Child::new(name, behavior, location_id);
        let tx = self.connection.transaction()?;
        tx.execute(
            "INSERT INTO children (id, name, behavior, location_id) VALUES (?1, ?2, ?3, ?4)",
            params![child.id, child.name, child.behavior.as_str(), child.location_id],
        )?;
        if behavior == Behavior::Good {
            tx.execute(
                "UPDATE locations SET good_children = good_children + 1 WHERE id = ?1",
                params![child.location_id],
            )?;
        }
        tx.commit()?;

        debug!(id = %child.id, name = %child.name, behavior = %child.behavior, "child registered");
        Ok(child)
    }

    /// Lookup a location by id.
    pub fn location(&self, id: &str) -> Result<Option<Location>> {
        self.connection
            .query_row(
                "SELECT id, name, lat, lon, good_children FROM locations WHERE id = ?1",
                params![id],
                location_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    /// Lookup a location by its case-sensitive name.
    pub fn location_by_name(&self, name: &str) -> Result<Option<Location>> {
        self.connection
            .query_row(
                "SELECT id, name, lat, lon, good_children FROM locations WHERE name = ?1",
                params![name],
                location_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    /// Lookup a child by its case-sensitive name.
    pub fn child_by_name(&self, name: &str) -> Result<Option<Child>> {
        self.connection
            .query_row(
                "SELECT id, name, behavior, location_id FROM children WHERE name = ?1",
                params![name],
                child_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    /// All children with the given behavior, in registration order.
    pub fn children_with_behavior(&self, behavior: Behavior) -> Result<Vec<Child>> {
        let mut statement = self.connection.prepare(
            "SELECT id, name, behavior, location_id FROM children
             WHERE behavior = ?1 ORDER BY rowid",
        )?;
        let rows = statement.query_map(params![behavior.as_str()], child_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// All locations ranked by good-count, highest first. Ties keep
    /// registration order.
    pub fn locations_by_good_count(&self) -> Result<Vec<Location>> {
        let mut statement = self.connection.prepare(
            "SELECT id, name, lat, lon, good_children FROM locations
             ORDER BY good_children DESC, rowid ASC",
        )?;
        let rows = statement.query_map([], location_from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Number of registered locations.
    pub fn location_count(&self) -> Result<i64> {
        self.connection
            .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))
            .map_err(Error::from)
    }

    /// Number of registered children.
    pub fn child_count(&self) -> Result<i64> {
        self.connection
            .query_row("SELECT COUNT(*) FROM children", [], |row| row.get(0))
            .map_err(Error::from)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

fn location_from_row(row: &Row<'_>) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get(0)?,
        name: row.get(1)?,
        coordinates: Coordinates {
            lat: row.get(2)?,
            lon: row.get(3)?,
        },
        good_children: row.get(4)?,
    })
}

fn child_from_row(row: &Row<'_>) -> rusqlite::Result<Child> {
    let behavior: String = row.get(2)?;
    // Stored values come from Behavior::as_str, so parse can only fail if
    // the database was edited out-of-band.
    let behavior = Behavior::parse(&behavior).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("invalid behavior value: {behavior}").into(),
        )
    })?;

    Ok(Child {
        id: row.get(0)?,
        name: row.get(1)?,
        behavior,
        location_id: row.get(3)?,
    })
}
