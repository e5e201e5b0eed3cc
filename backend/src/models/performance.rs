//! Performance (grades) passthrough types.
//!
//! The gateway does not interpret grade payloads; it only needs the subject id
//! to route score queries, so everything else is kept as raw JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSubject {
    #[serde(rename = "SuID", default)]
    pub subject_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScore {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Scores keyed by period, then by work type, as the portal groups them.
pub type ScoreTable = BTreeMap<String, BTreeMap<String, Vec<PerformanceScore>>>;

/// Body of the portal's score endpoint (and of `POST /api/v1/performance/score`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceScoreRequest {
    #[serde(rename = "SuID", default)]
    pub subject_id: String,
    #[serde(default)]
    pub datastart: String,
    #[serde(default)]
    pub dataend: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_keeps_unknown_fields() {
        let json = r#"{"SuID": "17", "SuName": "Physics", "Teacher": "Ivanova"}"#;
        let subject: PerformanceSubject = serde_json::from_str(json).unwrap();
        assert_eq!(subject.subject_id, "17");
        assert_eq!(subject.fields["SuName"], "Physics");

        let back = serde_json::to_value(&subject).unwrap();
        assert_eq!(back["SuID"], "17");
        assert_eq!(back["Teacher"], "Ivanova");
    }

    #[test]
    fn test_score_table_shape() {
        let json = r#"{"2024-09": {"exam": [{"mark": 5}]}}"#;
        let table: ScoreTable = serde_json::from_str(json).unwrap();
        assert_eq!(table["2024-09"]["exam"][0].fields["mark"], 5);
    }
}
