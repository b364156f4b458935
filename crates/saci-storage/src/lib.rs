// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable chat log on SQLite for the Saci relay.
//!
//! The log is an append-only audit record of relayed conversations. The
//! relay's in-memory window is the source of truth for prompt context; this
//! crate only records what flowed through, so a write failure here must
//! never abort a reply.

pub mod database;
pub mod migrations;
pub mod queries;

use saci_core::{ChatRecord, SaciError};

pub use database::Database;

/// Append-only conversation log backed by SQLite.
pub struct ChatLog {
    db: Database,
}

impl ChatLog {
    /// Opens the log at `path`, creating the schema on first use.
    pub async fn open(path: &str) -> Result<Self, SaciError> {
        let db = Database::open(path).await?;
        Ok(Self { db })
    }

    /// Records one conversation turn.
    pub async fn append(&self, record: &ChatRecord) -> Result<(), SaciError> {
        queries::append(&self.db, record).await
    }

    /// Returns the most recent `limit` turns for `phone`, oldest first.
    pub async fn recent(&self, phone: &str, limit: u32) -> Result<Vec<ChatRecord>, SaciError> {
        queries::recent(&self.db, phone, limit).await
    }

    /// Checkpoints and releases the database. Call before shutdown.
    pub async fn close(&self) -> Result<(), SaciError> {
        self.db.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use saci_core::Role;
    use tempfile::tempdir;

    #[tokio::test]
    async fn log_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.db");
        let path = path.to_str().unwrap();

        let log = ChatLog::open(path).await.unwrap();
        log.append(&ChatRecord {
            phone: "5511999".into(),
            role: Role::User,
            content: "oi".into(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
        log.close().await.unwrap();
        drop(log);

        let log = ChatLog::open(path).await.unwrap();
        let records = log.recent("5511999", 10).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "oi");
    }
}
