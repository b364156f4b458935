// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL queries over the `chat_history` table.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::params;

use saci_core::{ChatRecord, Role, SaciError};

use crate::database::{map_tr_err, Database};

/// Appends one turn to the durable log.
pub async fn append(db: &Database, record: &ChatRecord) -> Result<(), SaciError> {
    let phone = record.phone.clone();
    let role = record.role.to_string();
    let content = record.content.clone();
    let created_at = record.created_at.to_rfc3339();

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_history (phone, role, content, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![phone, role, content, created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Returns the most recent `limit` turns for `phone` in chronological order.
///
/// The query selects newest-first (so LIMIT keeps the tail of the
/// conversation) and the result is reversed back to oldest-first. The `id`
/// tiebreaker keeps turns written in the same instant ordered by insertion.
pub async fn recent(db: &Database, phone: &str, limit: u32) -> Result<Vec<ChatRecord>, SaciError> {
    let phone = phone.to_owned();

    let mut records = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT phone, role, content, created_at FROM chat_history
                 WHERE phone = ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![phone, limit], |row| {
                let role: String = row.get(1)?;
                let created_at: String = row.get(3)?;
                Ok(ChatRecord {
                    phone: row.get(0)?,
                    role: Role::from_str(&role).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            1,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?,
                    content: row.get(2)?,
                    created_at: DateTime::parse_from_rfc3339(&created_at)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                3,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?,
                })
            })?;
            let records = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await
        .map_err(map_tr_err)?;

    records.reverse();
    Ok(records)
}
