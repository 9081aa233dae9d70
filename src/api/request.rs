//! Request types for the reconciliation engine API.
//!
//! Query strings are captured as raw text and validated here, so a bad or
//! missing month produces the engine's own validation error instead of an
//! extractor rejection. Request bodies reuse the `New*` and `*Patch` model
//! types directly.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::MonthKey;

/// `?month=YYYY-MM` on the earnings and payroll-summary endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthQuery {
    /// The raw month key.
    #[serde(default)]
    pub month: Option<String>,
}

impl MonthQuery {
    /// Parses the month key; a missing key is as invalid as a malformed one.
    pub fn month_key(&self) -> EngineResult<MonthKey> {
        MonthKey::parse(self.month.as_deref().unwrap_or_default())
    }
}

/// `?period=YYYY-MM` on the regeneration endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// The raw period key.
    #[serde(default)]
    pub period: Option<String>,
}

impl PeriodQuery {
    /// Parses the period key.
    pub fn period_key(&self) -> EngineResult<MonthKey> {
        MonthKey::parse(self.period.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_month_query_parses_valid_key() {
        let query = MonthQuery {
            month: Some("2024-05".to_string()),
        };
        assert_eq!(query.month_key().unwrap().to_string(), "2024-05");
    }

    #[test]
    fn test_missing_month_is_invalid() {
        let query = MonthQuery::default();
        assert!(matches!(
            query.month_key(),
            Err(EngineError::InvalidMonthKey { value }) if value.is_empty()
        ));
    }

    #[test]
    fn test_period_query_rejects_bad_month() {
        let query = PeriodQuery {
            period: Some("2024-13".to_string()),
        };
        assert!(query.period_key().is_err());
    }
}
