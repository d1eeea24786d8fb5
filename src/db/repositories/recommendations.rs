use rusqlite::{params, Row};

use crate::db::{
    helpers::{parse_confidence, parse_datetime, parse_direction},
    models::PersistentRecommendation,
    Database,
};
use crate::error::CoreResult;

fn row_to_recommendation(row: &Row) -> CoreResult<PersistentRecommendation> {
    let direction: String = row.get("adjustment_direction")?;
    let confidence: String = row.get("confidence")?;
    let timestamp: String = row.get("timestamp")?;

    Ok(PersistentRecommendation {
        bean_id: row.get("bean_id")?,
        suggested_grind_setting: row.get("suggested_grind_setting")?,
        adjustment_direction: parse_direction(&direction)?,
        reason: row.get("reason")?,
        recommended_dose: row.get("recommended_dose")?,
        target_time_min: row.get("target_time_min")?,
        target_time_max: row.get("target_time_max")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
        was_followed: row.get("was_followed")?,
        based_on_taste: row.get("based_on_taste")?,
        confidence: parse_confidence(&confidence)?,
    })
}

const RECOMMENDATION_COLUMNS: &str = "bean_id, suggested_grind_setting, adjustment_direction, \
     reason, recommended_dose, target_time_min, target_time_max, timestamp, \
     was_followed, based_on_taste, confidence";

impl Database {
    /// Insert or replace the single live record for a bean.
    pub async fn upsert_recommendation(
        &self,
        record: &PersistentRecommendation,
    ) -> CoreResult<()> {
        let record = record.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO recommendations (bean_id, suggested_grind_setting,
                     adjustment_direction, reason, recommended_dose, target_time_min,
                     target_time_max, timestamp, was_followed, based_on_taste, confidence)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                 ON CONFLICT(bean_id) DO UPDATE SET
                     suggested_grind_setting = excluded.suggested_grind_setting,
                     adjustment_direction = excluded.adjustment_direction,
                     reason = excluded.reason,
                     recommended_dose = excluded.recommended_dose,
                     target_time_min = excluded.target_time_min,
                     target_time_max = excluded.target_time_max,
                     timestamp = excluded.timestamp,
                     was_followed = excluded.was_followed,
                     based_on_taste = excluded.based_on_taste,
                     confidence = excluded.confidence",
                params![
                    record.bean_id,
                    record.suggested_grind_setting,
                    record.adjustment_direction.as_str(),
                    record.reason,
                    record.recommended_dose,
                    record.target_time_min,
                    record.target_time_max,
                    record.timestamp.to_rfc3339(),
                    record.was_followed,
                    record.based_on_taste,
                    record.confidence.as_str(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Current record for a bean; "none saved yet" is not a failure.
    pub async fn get_recommendation(
        &self,
        bean_id: &str,
    ) -> CoreResult<Option<PersistentRecommendation>> {
        let bean_id = bean_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RECOMMENDATION_COLUMNS} FROM recommendations WHERE bean_id = ?1"
            ))?;

            let mut rows = stmt.query(params![bean_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_recommendation(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Flip the followed flag on a stored recommendation. A no-op when
    /// no recommendation exists for the bean, like `delete_recommendation`.
    pub async fn set_recommendation_followed(
        &self,
        bean_id: &str,
        was_followed: bool,
    ) -> CoreResult<()> {
        let bean_id = bean_id.to_string();
        self.execute(move |conn| {
            conn.execute(
                "UPDATE recommendations SET was_followed = ?1 WHERE bean_id = ?2",
                params![was_followed, bean_id],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn delete_recommendation(&self, bean_id: &str) -> CoreResult<()> {
        let bean_id = bean_id.to_string();
        self.execute(move |conn| {
            conn.execute(
                "DELETE FROM recommendations WHERE bean_id = ?1",
                params![bean_id],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn delete_all_recommendations(&self) -> CoreResult<()> {
        self.execute(|conn| {
            conn.execute("DELETE FROM recommendations", [])?;
            Ok(())
        })
        .await
    }

    pub async fn list_recommendation_bean_ids(&self) -> CoreResult<Vec<String>> {
        self.execute(|conn| {
            let mut stmt =
                conn.prepare("SELECT bean_id FROM recommendations ORDER BY bean_id ASC")?;

            let mut rows = stmt.query([])?;
            let mut bean_ids = Vec::new();
            while let Some(row) = rows.next()? {
                bean_ids.push(row.get(0)?);
            }
            Ok(bean_ids)
        })
        .await
    }
}
