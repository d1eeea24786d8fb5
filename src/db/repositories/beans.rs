use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    helpers::{parse_datetime, parse_optional_date},
    models::{Bean, BeanInput},
    Database,
};
use crate::error::{CoreError, CoreResult};

fn row_to_bean(row: &Row) -> CoreResult<Bean> {
    let roast_date: Option<String> = row.get("roast_date")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Bean {
        id: row.get("id")?,
        name: row.get("name")?,
        roaster: row.get("roaster")?,
        roast_date: parse_optional_date(roast_date, "roast_date")?,
        notes: row.get("notes")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

const BEAN_COLUMNS: &str = "id, name, roaster, roast_date, notes, created_at, updated_at";

impl Database {
    pub async fn create_bean(&self, input: BeanInput) -> CoreResult<Bean> {
        let now = Utc::now();
        let bean = Bean {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            roaster: input.roaster,
            roast_date: input.roast_date,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };

        let record = bean.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO beans (id, name, roaster, roast_date, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.name,
                    record.roaster,
                    record.roast_date.map(|d| d.format("%Y-%m-%d").to_string()),
                    record.notes,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await?;

        Ok(bean)
    }

    pub async fn get_bean(&self, bean_id: &str) -> CoreResult<Bean> {
        let bean_id = bean_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BEAN_COLUMNS} FROM beans WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![bean_id])?;
            match rows.next()? {
                Some(row) => row_to_bean(row),
                None => Err(CoreError::BeanNotFound(bean_id)),
            }
        })
        .await
    }

    /// Like `get_bean` but "missing" is a normal outcome, not a failure.
    pub async fn find_bean(&self, bean_id: &str) -> CoreResult<Option<Bean>> {
        let bean_id = bean_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BEAN_COLUMNS} FROM beans WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![bean_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_bean(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    pub async fn list_beans(&self) -> CoreResult<Vec<Bean>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BEAN_COLUMNS} FROM beans ORDER BY created_at DESC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut beans = Vec::new();
            while let Some(row) = rows.next()? {
                beans.push(row_to_bean(row)?);
            }
            Ok(beans)
        })
        .await
    }

    pub async fn update_bean(&self, bean_id: &str, input: BeanInput) -> CoreResult<()> {
        let bean_id = bean_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE beans
                 SET name = ?1,
                     roaster = ?2,
                     roast_date = ?3,
                     notes = ?4,
                     updated_at = ?5
                 WHERE id = ?6",
                params![
                    input.name,
                    input.roaster,
                    input.roast_date.map(|d| d.format("%Y-%m-%d").to_string()),
                    input.notes,
                    Utc::now().to_rfc3339(),
                    bean_id,
                ],
            )?;

            if rows_affected == 0 {
                return Err(CoreError::BeanNotFound(bean_id));
            }
            Ok(())
        })
        .await
    }

    /// Delete a bean. Its shots are kept; they become dangling
    /// references that readers report explicitly.
    pub async fn delete_bean(&self, bean_id: &str) -> CoreResult<()> {
        let bean_id = bean_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM beans WHERE id = ?1", params![bean_id])?;
            if rows_affected == 0 {
                return Err(CoreError::BeanNotFound(bean_id));
            }
            Ok(())
        })
        .await
    }
}
