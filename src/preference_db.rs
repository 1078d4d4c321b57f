use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::Path;

use crate::storage::KeyValueStore;
use crate::utils;

/* Durable preferences for hosts that have no key-value store of their own.
A single `setting` table of text keys and text values; the version in
`db_metadata` tells which migrations have already been applied.
*/

pub const FILE_NAME: &str = "preferences.db";

type Migration = fn(&Transaction) -> Result<()>;

// index `i` brings the schema from version `i` to `i + 1`
const MIGRATIONS: &[Migration] = &[create_setting_table];

fn create_setting_table(tx: &Transaction) -> Result<()> {
    let sql = "
    CREATE TABLE setting (
        key               TEXT    PRIMARY KEY
                                  NOT NULL
                                  UNIQUE,
        value             TEXT    NOT NULL
    );
    ";
    for s in sql_split::split(sql) {
        tx.execute(&s, ())?;
    }
    Ok(())
}

// Returns the version the schema ended up at.
fn migrate(tx: &Transaction, migrations: &[Migration]) -> Result<usize> {
    let stored_version = utils::db::init_metadata_and_get_version(tx)?;
    let latest = migrations.len();
    let pending = match usize::try_from(stored_version) {
        Ok(version) if version <= latest => &migrations[version..],
        _ => bail!(
            "{} was written by a newer version: schema {} > {}",
            FILE_NAME,
            stored_version,
            latest
        ),
    };
    if !pending.is_empty() {
        info!(
            "[preference_db] migrating schema {} -> {}",
            stored_version, latest
        );
        for migration in pending {
            migration(tx)?;
        }
        utils::db::set_version_in_metadata(tx, latest as i32)?;
    }
    Ok(latest)
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(support_dir: &str) -> Result<SqliteStore> {
        let path = Path::new(support_dir).join(FILE_NAME);
        debug!("[preference_db] opening {}", path.display());
        let mut conn = Connection::open(path)?;
        let tx = conn.transaction()?;
        migrate(&tx, MIGRATIONS)?;
        tx.commit()?;
        Ok(SqliteStore { conn })
    }

    pub fn flush(&self) -> Result<()> {
        self.conn.cache_flush()?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get_string(&self, key: &str, default: &str) -> Result<String> {
        let mut query = self
            .conn
            .prepare_cached("SELECT value FROM setting WHERE key = ?1;")?;
        let result: Option<String> = query.query_row([key], |row| row.get(0)).optional()?;
        Ok(result.unwrap_or_else(|| default.to_string()))
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        let sql = "INSERT OR REPLACE INTO setting (key, value) VALUES (?1, ?2);";
        tx.execute(sql, (key, value))?;
        tx.commit()?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM setting WHERE key = ?1;", (key,))?;
        Ok(())
    }
}
