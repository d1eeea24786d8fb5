//! Coffee bean data models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A bag of beans the user is dialing in against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bean {
    pub id: String,
    pub name: String,
    pub roaster: Option<String>,
    pub roast_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bean {
    /// Whole days between the roast date and `now`, when known.
    pub fn days_since_roast(&self, now: DateTime<Utc>) -> Option<i64> {
        self.roast_date
            .map(|roast| (now.date_naive() - roast).num_days())
    }
}

/// Input data for creating or updating a bean.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeanInput {
    pub name: String,
    pub roaster: Option<String>,
    pub roast_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
