//! Student record, create/update DTOs, and grade labels.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Enrollment status of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
}

impl StudentStatus {
    /// All statuses in display order.
    pub const ALL: [StudentStatus; 3] = [Self::Active, Self::Inactive, Self::Graduated];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Graduated => "Graduated",
        }
    }

    /// Lowercase identifier, as shown on status badges.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Graduated => "graduated",
        }
    }
}

/// A student enrollment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// External student identifier (e.g. "STU001"), distinct from `id`.
    pub student_id: String,
    pub grade: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub address: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub enrollment_date: NaiveDate,
    pub status: StudentStatus,
}

impl StudentRecord {
    /// Build a record from create data and an assigned identifier.
    pub fn from_create(id: String, data: CreateStudent) -> Self {
        Self {
            id,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            student_id: data.student_id,
            grade: data.grade,
            date_of_birth: data.date_of_birth,
            phone_number: data.phone_number,
            address: data.address,
            guardian_name: data.guardian_name,
            guardian_phone: data.guardian_phone,
            enrollment_date: data.enrollment_date,
            status: data.status,
        }
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match over name, student ID, and email.
    ///
    /// An empty term matches every record. The term is not trimmed.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.first_name, &self.last_name, &self.student_id, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// DTO for creating a student. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub grade: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub address: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub enrollment_date: NaiveDate,
    pub status: StudentStatus,
}

/// DTO for updating a student. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub grade: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<StudentStatus>,
}

impl UpdateStudent {
    /// Update that only changes the status.
    pub fn status(status: StudentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Merge the supplied fields onto `record`.
    pub fn apply_to(self, record: &mut StudentRecord) {
        if let Some(v) = self.first_name {
            record.first_name = v;
        }
        if let Some(v) = self.last_name {
            record.last_name = v;
        }
        if let Some(v) = self.email {
            record.email = v;
        }
        if let Some(v) = self.student_id {
            record.student_id = v;
        }
        if let Some(v) = self.grade {
            record.grade = v;
        }
        if let Some(v) = self.date_of_birth {
            record.date_of_birth = v;
        }
        if let Some(v) = self.phone_number {
            record.phone_number = v;
        }
        if let Some(v) = self.address {
            record.address = v;
        }
        if let Some(v) = self.guardian_name {
            record.guardian_name = v;
        }
        if let Some(v) = self.guardian_phone {
            record.guardian_phone = v;
        }
        if let Some(v) = self.enrollment_date {
            record.enrollment_date = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
    }
}

impl From<CreateStudent> for UpdateStudent {
    /// Full replacement of every field, as the edit form submits it.
    fn from(data: CreateStudent) -> Self {
        Self {
            first_name: Some(data.first_name),
            last_name: Some(data.last_name),
            email: Some(data.email),
            student_id: Some(data.student_id),
            grade: Some(data.grade),
            date_of_birth: Some(data.date_of_birth),
            phone_number: Some(data.phone_number),
            address: Some(data.address),
            guardian_name: Some(data.guardian_name),
            guardian_phone: Some(data.guardian_phone),
            enrollment_date: Some(data.enrollment_date),
            status: Some(data.status),
        }
    }
}

/// Grade label constants.
pub mod grade {
    pub const NINTH: &str = "9th Grade";
    pub const TENTH: &str = "10th Grade";
    pub const ELEVENTH: &str = "11th Grade";
    pub const TWELFTH: &str = "12th Grade";

    /// Every selectable grade, lowest first.
    pub const ALL: [&str; 4] = [NINTH, TENTH, ELEVENTH, TWELFTH];

    /// Grades shown in the dashboard distribution.
    pub const DASHBOARD: [&str; 3] = [TENTH, ELEVENTH, TWELFTH];

    /// Axis label for a grade ("10th Grade" -> "10th").
    pub fn short_label(label: &str) -> &str {
        label.strip_suffix(" Grade").unwrap_or(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StudentRecord {
        StudentRecord {
            id: "1".to_string(),
            first_name: "Emma".to_string(),
            last_name: "Johnson".to_string(),
            email: "emma.johnson@email.com".to_string(),
            student_id: "STU001".to_string(),
            grade: grade::TENTH.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2008, 3, 15).unwrap(),
            phone_number: "(555) 123-4567".to_string(),
            address: "123 Main St".to_string(),
            guardian_name: "Michael Johnson".to_string(),
            guardian_phone: "(555) 123-4568".to_string(),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            status: StudentStatus::Active,
        }
    }

    #[test]
    fn test_matches_search_fields() {
        let s = sample();
        assert!(s.matches_search("emma"));
        assert!(s.matches_search("JOHN"));
        assert!(s.matches_search("stu001"));
        assert!(s.matches_search("@email.com"));
        assert!(!s.matches_search("liam"));
    }

    #[test]
    fn test_matches_search_ignores_other_fields() {
        let s = sample();
        // Address and guardian are not searched.
        assert!(!s.matches_search("main st"));
        assert!(!s.matches_search("michael"));
    }

    #[test]
    fn test_empty_search_matches_all() {
        assert!(sample().matches_search(""));
    }

    #[test]
    fn test_search_term_not_trimmed() {
        assert!(!sample().matches_search(" emma"));
        assert!(!sample().matches_search("   "));
        assert!(sample().matches_search("emma.johnson"));
    }

    #[test]
    fn test_apply_partial_update() {
        let mut s = sample();
        let before = s.clone();
        UpdateStudent {
            email: Some("emma@school.edu".to_string()),
            ..Default::default()
        }
        .apply_to(&mut s);

        assert_eq!(s.email, "emma@school.edu");
        assert_eq!(s.first_name, before.first_name);
        assert_eq!(s.status, before.status);
        assert_eq!(s.date_of_birth, before.date_of_birth);
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&StudentStatus::Graduated).unwrap();
        assert_eq!(json, "\"graduated\"");
        let parsed: StudentStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(parsed, StudentStatus::Inactive);
    }

    #[test]
    fn test_grade_short_label() {
        assert_eq!(grade::short_label("10th Grade"), "10th");
        assert_eq!(grade::short_label("Kindergarten"), "Kindergarten");
    }
}
