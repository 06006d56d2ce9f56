//! LMDB-backed durable storage.

use std::fs;
use std::path::{Path, PathBuf};

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::config::StoreConfig;
use crate::storage::DurableStorage;

const DB_NAME: &str = "kv";

/// An open LMDB environment holding one key-value database.
///
/// Each `set` runs in its own write transaction, so a value is either fully
/// replaced or left as it was.
pub struct AppDbState {
    env: Environment,
    db: Database,
    path: PathBuf,
}

impl AppDbState {
    pub fn init(config: &StoreConfig) -> Result<Self, AppResponse> {
        config.validate()?;
        let path = config.path.clone();

        fs::create_dir_all(&path)?;
        info!("Opening LMDB environment at {}", path.display());

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(config.map_size)
            .open(&path)?;
        let db = env.create_db(Some(DB_NAME), DatabaseFlags::empty())?;

        Ok(Self { env, db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes pending writes to disk.
    ///
    /// The environment itself is released when the state is dropped.
    pub fn close_database(&self) -> Result<(), AppResponse> {
        self.env.sync(true)?;
        info!("LMDB environment at {} synced for close", self.path.display());
        Ok(())
    }
}

impl DurableStorage for AppDbState {
    fn get(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;
        let value = match txn.get(self.db, &key) {
            Ok(bytes) => Some(String::from_utf8(bytes.to_vec()).map_err(|e| {
                warn!("Value under {key} is not valid UTF-8: {e}");
                AppResponse::SerializationError(format!("Invalid UTF-8 under {key}: {e}"))
            })?),
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        txn.abort();
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;
        debug!("Wrote {} bytes under {key}", value.len());
        Ok(())
    }
}
