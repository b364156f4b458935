// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use tracing::debug;

use saci_core::SaciError;

use crate::migrations;

/// Handle to the SQLite database behind the durable chat log.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if necessary) the database at `path`, applies
    /// PRAGMAs, and runs pending migrations.
    pub async fn open(path: &str) -> Result<Self, SaciError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_tr_err)?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            migrations::run_migrations(conn)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "SQLite chat log opened");
        Ok(Self { conn })
    }

    /// Returns the underlying connection for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL. Call before shutdown.
    pub async fn close(&self) -> Result<(), SaciError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Maps a tokio-rusqlite error into the storage error variant.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> SaciError {
    SaciError::Storage {
        source: Box::new(e),
    }
}
