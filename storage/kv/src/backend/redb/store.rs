//! Implementation of [`Store`] for `redb`.

//---------------------------------------------------------------------------------------------------- Import
use std::fs::OpenOptions;

use redb::{Builder, Database, Durability, TableDefinition};
use tracing::{debug, warn};

use crate::{
    config::{Config, SyncMode},
    Store, StoreResult,
};

//---------------------------------------------------------------------------------------------------- Constants
/// The single table, raw key bytes -> raw record bytes.
const BLOCKS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("blocks");

//---------------------------------------------------------------------------------------------------- RedbStore
/// A persistent [`Store`], backed by `redb`.
///
/// Every [`Store`] call is its own transaction.
pub struct RedbStore {
    /// The actual database.
    db: Database,

    /// The `redb` version of the configured [`SyncMode`],
    /// set on every write transaction.
    durability: Durability,
}

impl Drop for RedbStore {
    fn drop(&mut self) {
        // INVARIANT: drop(RedbStore) must sync.
        if let Err(e) = self.sync() {
            warn!("store sync error: {e}");
        }
    }
}

impl RedbStore {
    /// Open (or create) the store file described by `config`.
    ///
    /// # Errors
    /// Fails if the directory or file cannot be created/opened,
    /// or if the file exists and is not a valid, intact store.
    #[cold]
    #[inline(never)] // called once.
    pub fn open(config: &Config) -> StoreResult<Self> {
        std::fs::create_dir_all(config.directory())?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(config.store_file())?;

        let mut db = Builder::new().create_file(file)?;

        if !db.check_integrity()? {
            warn!("store at {} was repaired", config.store_file().display());
        }

        debug!(
            path = %config.store_file().display(),
            sync_mode = ?config.sync_mode,
            "opened block store"
        );

        Self::init(db, config.sync_mode)
    }

    /// Open a store that lives in memory and is gone when dropped.
    ///
    /// # Errors
    /// Only if `redb` fails to initialize.
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Builder::new().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db, SyncMode::Safe)
    }

    /// Create the table so reads never see a missing table.
    fn init(db: Database, sync_mode: SyncMode) -> StoreResult<Self> {
        let durability = match sync_mode {
            SyncMode::Safe => Durability::Immediate,
            SyncMode::Fast => Durability::Eventual,
        };

        let tx_rw = db.begin_write()?;
        tx_rw.open_table(BLOCKS)?;
        tx_rw.commit()?;

        Ok(Self { db, durability })
    }

    /// Fully sync the store to disk.
    ///
    /// # Errors
    /// If the (empty) sync transaction fails to commit.
    pub fn sync(&self) -> StoreResult<()> {
        // `redb`'s syncs are tied with write transactions,
        // so just create one, don't do anything and commit.
        let mut tx_rw = self.db.begin_write()?;
        tx_rw.set_durability(Durability::Immediate);
        tx_rw.set_two_phase_commit(true);
        tx_rw.commit()?;
        Ok(())
    }

    /// Run `f` with the table inside a write transaction, then commit.
    fn write<T>(
        &self,
        f: impl FnOnce(&mut redb::Table<'_, &'static [u8], &'static [u8]>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut tx_rw = self.db.begin_write()?;
        tx_rw.set_durability(self.durability);

        let t = {
            let mut table = tx_rw.open_table(BLOCKS)?;
            f(&mut table)?
        };

        tx_rw.commit()?;
        Ok(t)
    }
}

impl Store for RedbStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let tx_ro = self.db.begin_read()?;
        let table = tx_ro.open_table(BLOCKS)?;
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.write(|table| {
            table.insert(key, value)?;
            Ok(())
        })
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<bool> {
        self.write(|table| Ok(table.remove(key)?.is_some()))
    }
}
