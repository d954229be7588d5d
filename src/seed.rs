//! Mock seed data loaded into the store at startup.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::student::StudentRecord;

/// Built-in seed records.
const DEFAULT_SEED: &str = include_str!("../assets/seed_students.json");

/// Parse the built-in seed records.
pub fn default_records() -> Result<Vec<StudentRecord>> {
    parse_records(DEFAULT_SEED)
}

/// Load seed records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<StudentRecord>> {
    let content = std::fs::read_to_string(path)?;
    let records = parse_records(&content)?;
    tracing::info!("Loaded {} seed records from {:?}", records.len(), path);
    Ok(records)
}

/// Parse a JSON array of records, rejecting duplicate identifiers.
pub fn parse_records(json: &str) -> Result<Vec<StudentRecord>> {
    let records: Vec<StudentRecord> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.id.as_str()) {
            return Err(AppError::validation(format!(
                "Duplicate student id '{}' in seed data",
                record.id
            )));
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::{StudentStatus, grade};

    #[test]
    fn test_default_seed() {
        let records = default_records().unwrap();
        assert_eq!(records.len(), 3);

        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);

        let grades: Vec<_> = records.iter().map(|r| r.grade.as_str()).collect();
        assert_eq!(grades, [grade::TENTH, grade::ELEVENTH, grade::TWELFTH]);

        assert!(records.iter().all(|r| r.status == StudentStatus::Active));
        assert_eq!(records[1].full_name(), "Liam Smith");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let one = r#"{"id":"7","firstName":"A","lastName":"B","email":"","studentId":"S7","grade":"9th Grade",
            "dateOfBirth":"2010-01-01","phoneNumber":"","address":"","guardianName":"","guardianPhone":"",
            "enrollmentDate":"2024-09-01","status":"inactive"}"#;
        let json = format!("[{one},{one}]");
        assert!(matches!(parse_records(&json), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bad_status_rejected() {
        let json = r#"[{"id":"7","firstName":"A","lastName":"B","email":"","studentId":"S7","grade":"9th Grade",
            "dateOfBirth":"2010-01-01","phoneNumber":"","address":"","guardianName":"","guardianPhone":"",
            "enrollmentDate":"2024-09-01","status":"expelled"}]"#;
        assert!(matches!(parse_records(json), Err(AppError::Seed(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_records(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
