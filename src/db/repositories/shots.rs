use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    helpers::{parse_datetime, parse_taste_primary, parse_taste_secondary},
    models::{Shot, ShotInput, TastePrimary, TasteSecondary},
    Database, ShotEvent, ShotEventKind,
};
use crate::error::{CoreError, CoreResult};

fn row_to_shot(row: &Row) -> CoreResult<Shot> {
    let taste_primary: Option<String> = row.get("taste_primary")?;
    let taste_secondary: Option<String> = row.get("taste_secondary")?;
    let timestamp: String = row.get("timestamp")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Shot {
        id: row.get("id")?,
        bean_id: row.get("bean_id")?,
        weight_in_grams: row.get("weight_in_grams")?,
        weight_out_grams: row.get("weight_out_grams")?,
        extraction_time_secs: row.get("extraction_time_secs")?,
        grinder_setting: row.get("grinder_setting")?,
        taste_primary: parse_taste_primary(taste_primary)?,
        taste_secondary: parse_taste_secondary(taste_secondary)?,
        notes: row.get("notes")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

const SHOT_COLUMNS: &str = "id, bean_id, weight_in_grams, weight_out_grams, \
     extraction_time_secs, grinder_setting, taste_primary, taste_secondary, \
     notes, timestamp, created_at, updated_at";

fn validate_input(input: &ShotInput) -> CoreResult<()> {
    if input.weight_in_grams <= 0.0 || input.weight_out_grams <= 0.0 {
        return Err(CoreError::Validation(format!(
            "shot weights must be positive (in={}, out={})",
            input.weight_in_grams, input.weight_out_grams
        )));
    }
    if input.extraction_time_secs < 0 {
        return Err(CoreError::Validation(format!(
            "extraction time cannot be negative ({})",
            input.extraction_time_secs
        )));
    }
    Ok(())
}

impl Database {
    pub async fn record_shot(&self, input: ShotInput) -> CoreResult<Shot> {
        validate_input(&input)?;

        let now = Utc::now();
        let shot = Shot {
            id: Uuid::new_v4().to_string(),
            bean_id: input.bean_id,
            weight_in_grams: input.weight_in_grams,
            weight_out_grams: input.weight_out_grams,
            extraction_time_secs: input.extraction_time_secs,
            grinder_setting: input.grinder_setting,
            taste_primary: input.taste_primary,
            taste_secondary: input.taste_secondary,
            notes: input.notes,
            timestamp: now,
            created_at: now,
            updated_at: now,
        };

        let record = shot.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO shots (id, bean_id, weight_in_grams, weight_out_grams,
                     extraction_time_secs, grinder_setting, taste_primary, taste_secondary,
                     notes, timestamp, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    record.id,
                    record.bean_id,
                    record.weight_in_grams,
                    record.weight_out_grams,
                    record.extraction_time_secs,
                    record.grinder_setting,
                    record.taste_primary.map(|t| t.as_str()),
                    record.taste_secondary.map(|t| t.as_str()),
                    record.notes,
                    record.timestamp.to_rfc3339(),
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await?;

        self.notify_shots(ShotEvent {
            shot_id: shot.id.clone(),
            bean_id: shot.bean_id.clone(),
            kind: ShotEventKind::Recorded,
        });

        Ok(shot)
    }

    pub async fn get_shot(&self, shot_id: &str) -> CoreResult<Shot> {
        let shot_id = shot_id.to_string();
        self.execute(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {SHOT_COLUMNS} FROM shots WHERE id = ?1"))?;

            let mut rows = stmt.query(params![shot_id])?;
            match rows.next()? {
                Some(row) => row_to_shot(row),
                None => Err(CoreError::ShotNotFound(shot_id)),
            }
        })
        .await
    }

    /// All shots for a bean, oldest first.
    pub async fn list_shots_for_bean(&self, bean_id: &str) -> CoreResult<Vec<Shot>> {
        let bean_id = bean_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SHOT_COLUMNS} FROM shots WHERE bean_id = ?1 ORDER BY timestamp ASC"
            ))?;

            let mut rows = stmt.query(params![bean_id])?;
            let mut shots = Vec::new();
            while let Some(row) = rows.next()? {
                shots.push(row_to_shot(row)?);
            }
            Ok(shots)
        })
        .await
    }

    /// Every recorded shot, oldest first.
    pub async fn list_shots(&self) -> CoreResult<Vec<Shot>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SHOT_COLUMNS} FROM shots ORDER BY timestamp ASC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut shots = Vec::new();
            while let Some(row) = rows.next()? {
                shots.push(row_to_shot(row)?);
            }
            Ok(shots)
        })
        .await
    }

    /// Shots with `start <= timestamp < end`, oldest first.
    pub async fn list_shots_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CoreResult<Vec<Shot>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SHOT_COLUMNS} FROM shots
                 WHERE timestamp >= ?1 AND timestamp < ?2
                 ORDER BY timestamp ASC"
            ))?;

            let mut rows = stmt.query(params![start.to_rfc3339(), end.to_rfc3339()])?;
            let mut shots = Vec::new();
            while let Some(row) = rows.next()? {
                shots.push(row_to_shot(row)?);
            }
            Ok(shots)
        })
        .await
    }

    /// The chronologically previous and next shot for the same bean.
    /// Ties on timestamp are broken by id so a sibling never appears on
    /// both sides. Either side is `None` at the ends of the sequence.
    pub async fn adjacent_shots(&self, shot: &Shot) -> CoreResult<(Option<Shot>, Option<Shot>)> {
        let bean_id = shot.bean_id.clone();
        let shot_id = shot.id.clone();
        let timestamp = shot.timestamp.to_rfc3339();

        self.execute(move |conn| {
            let mut prev_stmt = conn.prepare(&format!(
                "SELECT {SHOT_COLUMNS} FROM shots
                 WHERE bean_id = ?1
                   AND (timestamp < ?3 OR (timestamp = ?3 AND id < ?2))
                 ORDER BY timestamp DESC, id DESC
                 LIMIT 1"
            ))?;
            let mut rows = prev_stmt.query(params![bean_id, shot_id, timestamp])?;
            let previous = match rows.next()? {
                Some(row) => Some(row_to_shot(row)?),
                None => None,
            };

            let mut next_stmt = conn.prepare(&format!(
                "SELECT {SHOT_COLUMNS} FROM shots
                 WHERE bean_id = ?1
                   AND (timestamp > ?3 OR (timestamp = ?3 AND id > ?2))
                 ORDER BY timestamp ASC, id ASC
                 LIMIT 1"
            ))?;
            let mut rows = next_stmt.query(params![bean_id, shot_id, timestamp])?;
            let next = match rows.next()? {
                Some(row) => Some(row_to_shot(row)?),
                None => None,
            };

            Ok((previous, next))
        })
        .await
    }

    /// Attach (or revise) taste feedback on an existing shot. The only
    /// mutation this layer allows on a recorded shot.
    pub async fn update_shot_taste(
        &self,
        shot_id: &str,
        taste_primary: Option<TastePrimary>,
        taste_secondary: Option<TasteSecondary>,
    ) -> CoreResult<Shot> {
        let shot_id = shot_id.to_string();
        let updated = self
            .execute(move |conn| {
                let rows_affected = conn.execute(
                    "UPDATE shots
                     SET taste_primary = ?1,
                         taste_secondary = ?2,
                         updated_at = ?3
                     WHERE id = ?4",
                    params![
                        taste_primary.map(|t| t.as_str()),
                        taste_secondary.map(|t| t.as_str()),
                        Utc::now().to_rfc3339(),
                        shot_id,
                    ],
                )?;

                if rows_affected == 0 {
                    return Err(CoreError::ShotNotFound(shot_id.clone()));
                }

                let mut stmt =
                    conn.prepare(&format!("SELECT {SHOT_COLUMNS} FROM shots WHERE id = ?1"))?;
                let mut rows = stmt.query(params![shot_id])?;
                match rows.next()? {
                    Some(row) => row_to_shot(row),
                    None => Err(CoreError::ShotNotFound(shot_id)),
                }
            })
            .await?;

        self.notify_shots(ShotEvent {
            shot_id: updated.id.clone(),
            bean_id: updated.bean_id.clone(),
            kind: ShotEventKind::TasteUpdated,
        });

        Ok(updated)
    }

    pub async fn delete_shot(&self, shot_id: &str) -> CoreResult<()> {
        let shot_id_owned = shot_id.to_string();
        let bean_id = self
            .execute(move |conn| {
                let bean_id: Option<String> = {
                    let mut stmt = conn.prepare("SELECT bean_id FROM shots WHERE id = ?1")?;
                    let mut rows = stmt.query(params![shot_id_owned])?;
                    match rows.next()? {
                        Some(row) => Some(row.get(0)?),
                        None => None,
                    }
                };

                let bean_id = match bean_id {
                    Some(id) => id,
                    None => return Err(CoreError::ShotNotFound(shot_id_owned)),
                };

                conn.execute("DELETE FROM shots WHERE id = ?1", params![shot_id_owned])?;
                Ok(bean_id)
            })
            .await?;

        self.notify_shots(ShotEvent {
            shot_id: shot_id.to_string(),
            bean_id,
            kind: ShotEventKind::Deleted,
        });

        Ok(())
    }
}
