use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::cmp::Ordering;
use std::path::Path;

use crate::kv_store::{KeyValueStore, StorageKey};
use crate::utils;

/* The main database. All it holds is a flat key/value table with opaque
blobs, so the tracker never has to know about sql. Schema changes go through
the migration list below, the index + 1 of a migration is the version it
brings the db to.
*/

#[allow(clippy::type_complexity)]
fn open_db_and_run_migration(
    support_dir: &str,
    file_name: &str,
    migrations: &[&dyn Fn(&Transaction) -> Result<()>],
) -> Result<Connection> {
    debug!("open and run migration for {}", file_name);
    let mut conn = Connection::open(Path::new(support_dir).join(file_name))?;
    let tx = conn.transaction()?;

    let version = utils::db::init_metadata_and_get_version(&tx)? as usize;
    let target_version = migrations.len();
    debug!(
        "current version = {}, target_version = {}",
        version, target_version
    );
    match version.cmp(&target_version) {
        Ordering::Equal => (),
        Ordering::Less => {
            for (i, migration) in migrations.iter().enumerate().skip(version) {
                info!("running migration for version: {}", i + 1);
                migration(&tx)?;
            }
            utils::db::set_version_in_metadata(&tx, target_version as i32)?;
        }
        Ordering::Greater => {
            bail!(
                "version too high: current version = {}, target_version = {}",
                version,
                target_version
            );
        }
    }
    tx.commit()?;
    Ok(conn)
}

pub struct MainDb {
    conn: Connection,
}

impl MainDb {
    pub fn open(support_dir: &str) -> Result<MainDb> {
        let conn = open_db_and_run_migration(
            support_dir,
            "main.db",
            &[&|tx| {
                let sql = "
                CREATE TABLE kv (
                    key               TEXT    PRIMARY KEY
                                              NOT NULL
                                              UNIQUE,
                    value             BLOB    NOT NULL
                );
                ";
                for s in sql_split::split(sql) {
                    tx.execute(&s, ())?;
                }
                Ok(())
            }],
        )?;
        Ok(MainDb { conn })
    }

    pub fn flush(&self) -> Result<()> {
        self.conn.cache_flush()?;
        Ok(())
    }
}

impl KeyValueStore for MainDb {
    fn get(&self, key: StorageKey) -> Result<Option<Vec<u8>>> {
        let mut query = self
            .conn
            .prepare_cached("SELECT value FROM kv WHERE key = ?1;")?;
        let value = query
            .query_row([key.as_ref()], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: StorageKey, value: &[u8]) -> Result<()> {
        self.conn
            .prepare_cached("INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2);")?
            .execute((key.as_ref(), value))?;
        Ok(())
    }

    fn remove(&mut self, key: StorageKey) -> Result<()> {
        let changes = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1;", [key.as_ref()])?;
        debug!("[main_db.remove] key:{:?}, changes:{}", key, changes);
        Ok(())
    }
}
