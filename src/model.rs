//! Domain entities: Employee and Department.

use crate::entity::CacheEntity;
use serde::{Deserialize, Serialize};

/// An employee row.
///
/// JSON field names follow the wire format consumed by the HTTP surface
/// (`lastName`, `dId`); the cache payload uses the versioned binary envelope
/// and is unaffected by the renames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    /// Small integer gender code, carried opaquely.
    pub gender: i16,
    #[serde(rename = "dId")]
    pub department_id: i32,
}

impl CacheEntity for Employee {
    type Key = i32;

    fn cache_key(&self) -> Self::Key {
        self.id
    }

    fn cache_prefix() -> &'static str {
        "emp"
    }
}

/// A department row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i32,
    pub name: String,
}

impl CacheEntity for Department {
    type Key = i32;

    fn cache_key(&self) -> Self::Key {
        self.id
    }

    fn cache_prefix() -> &'static str {
        "dept"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::CacheKeyBuilder;

    fn sample_employee() -> Employee {
        Employee {
            id: 1001,
            last_name: "Zhang".to_string(),
            email: "z@x.com".to_string(),
            gender: 1,
            department_id: 1,
        }
    }

    #[test]
    fn test_employee_cache_key() {
        let emp = sample_employee();
        assert_eq!(emp.cache_key(), 1001);
        assert_eq!(CacheKeyBuilder::build::<Employee>(&emp.id), "emp:1001");
    }

    #[test]
    fn test_employee_json_field_names() {
        let emp = sample_employee();
        let json = serde_json::to_value(&emp).unwrap();

        assert_eq!(json["lastName"], "Zhang");
        assert_eq!(json["dId"], 1);
        assert_eq!(json["email"], "z@x.com");
        assert!(json.get("last_name").is_none());
    }

    #[test]
    fn test_employee_envelope_round_trip() {
        let emp = sample_employee();
        let bytes = emp.serialize_for_cache().unwrap();
        let decoded = Employee::deserialize_from_cache(&bytes).unwrap();
        assert_eq!(decoded, emp);
    }

    #[test]
    fn test_department_prefix() {
        let dept = Department {
            id: 1,
            name: "engineering".to_string(),
        };
        assert_eq!(CacheKeyBuilder::build::<Department>(&dept.id), "dept:1");
    }
}
