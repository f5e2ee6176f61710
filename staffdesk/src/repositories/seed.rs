//! First-run bootstrap data.

use crate::error::AppError;
use crate::models::{
    department::Department,
    user::{User, UserRole},
};
use crate::types::{DepartmentId, UserId};

use super::repository::{keys, Repository};

const ADMIN_NAME: &str = "Admin User";

pub fn initial_users() -> Vec<User> {
    vec![
        User {
            id: UserId::from("1"),
            username: "admin".into(),
            password: "admin123".into(),
            role: UserRole::Admin,
            name: ADMIN_NAME.into(),
            email: "admin@mgegroup.com".into(),
            department: "Management".into(),
            manager: None,
        },
        User {
            id: UserId::from("2"),
            username: "john".into(),
            password: "john123".into(),
            role: UserRole::Staff,
            name: "John Doe".into(),
            email: "john@mgegroup.com".into(),
            department: "Development".into(),
            manager: Some(ADMIN_NAME.into()),
        },
        User {
            id: UserId::from("3"),
            username: "jane".into(),
            password: "jane123".into(),
            role: UserRole::Staff,
            name: "Jane Smith".into(),
            email: "jane@mgegroup.com".into(),
            department: "Design".into(),
            manager: Some(ADMIN_NAME.into()),
        },
    ]
}

pub fn initial_departments() -> Vec<Department> {
    let dept = |id: &str, name: &str, tasks: [&str; 5]| Department {
        id: DepartmentId::from(id),
        name: name.into(),
        manager: ADMIN_NAME.into(),
        tasks: tasks.iter().map(|t| t.to_string()).collect(),
    };

    vec![
        dept(
            "1",
            "Development",
            [
                "Frontend Development",
                "Backend Development",
                "Database Design",
                "Testing",
                "Code Review",
            ],
        ),
        dept(
            "2",
            "Design",
            [
                "UI Design",
                "UX Research",
                "Prototyping",
                "Brand Design",
                "User Testing",
            ],
        ),
        dept(
            "3",
            "Marketing",
            [
                "Content Creation",
                "Social Media",
                "SEO",
                "Email Marketing",
                "Analytics",
            ],
        ),
    ]
}

/// Writes the seed users and departments under keys that are absent.
///
/// Existing keys are never touched, even when they hold an empty list.
pub fn bootstrap(repo: &Repository) -> Result<(), AppError> {
    if !repo.contains_key(keys::USERS)? {
        repo.replace_all(&initial_users())?;
        tracing::info!("Seeded default users");
    }
    if !repo.contains_key(keys::DEPARTMENTS)? {
        repo.replace_all(&initial_departments())?;
        tracing::info!("Seeded default departments");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::store::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn bootstrap_seeds_empty_store() {
        let repo = Repository::new(Arc::new(MemoryStore::new()));
        bootstrap(&repo).unwrap();

        let users = repo.load::<User>().unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users.iter().filter(|u| u.is_admin()).count(), 1);

        let departments = repo.load::<Department>().unwrap();
        let names: Vec<&str> = departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Development", "Design", "Marketing"]);
        assert!(departments.iter().all(|d| d.tasks.len() == 5));
    }

    #[test]
    fn bootstrap_keeps_existing_keys() {
        let repo = Repository::new(Arc::new(MemoryStore::new()));
        repo.replace_all::<User>(&[]).unwrap();
        bootstrap(&repo).unwrap();
        bootstrap(&repo).unwrap();

        assert!(repo.load::<User>().unwrap().is_empty());
        assert_eq!(repo.load::<Department>().unwrap().len(), 3);
    }
}
