use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DepartmentId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub manager: String,
    /// Ordered catalog of task labels offered on the daily report form.
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDepartment {
    #[validate(length(min = 1))]
    pub name: String,
    pub manager: String,
}

impl Department {
    pub fn new(name: String, manager: String) -> Self {
        Self {
            id: DepartmentId::new(),
            name,
            manager,
            tasks: Vec::new(),
        }
    }

    /// True when `label` may be used on a daily report for this department.
    pub fn offers_task(&self, label: &str) -> bool {
        self.tasks.is_empty() || self.tasks.iter().any(|t| t == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_department_starts_without_tasks() {
        let dept = Department::new("QA".into(), "Admin User".into());
        assert!(dept.tasks.is_empty());
        assert!(dept.offers_task("anything"));
    }

    #[test]
    fn offers_task_checks_catalog() {
        let mut dept = Department::new("QA".into(), "Admin User".into());
        dept.tasks = vec!["Testing".into(), "Triage".into()];
        assert!(dept.offers_task("Triage"));
        assert!(!dept.offers_task("Design"));
    }

    #[test]
    fn missing_tasks_key_reads_as_empty() {
        let dept: Department =
            serde_json::from_str(r#"{"id":"9","name":"Ops","manager":"Admin User"}"#).unwrap();
        assert!(dept.tasks.is_empty());
    }
}
