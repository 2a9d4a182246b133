//! Collaborator seams driven by the sync engine.
//!
//! [`HrSource`] is implemented by the BambooHR client, [`Directory`] by the
//! Google Admin Directory client. Tests substitute in-memory fakes.

use crate::error::{DirectoryError, HrError};
use crate::types::{ChangeKind, DirectoryUser, Employee, EmployeeId, UserBody, UserQuery};

/// Read access to the HR system.
pub trait HrSource {
    /// Every employee in the company directory.
    fn employee_directory(&self) -> Result<Vec<Employee>, HrError>;

    /// Ids of employees changed in the given way since `since`
    /// (`%Y-%m-%dT%H:%M:%S%z`).
    fn changed_employees(&self, kind: ChangeKind, since: &str)
        -> Result<Vec<EmployeeId>, HrError>;

    /// A single employee, restricted to `fields`.
    fn employee(&self, id: &EmployeeId, fields: &[&str]) -> Result<Employee, HrError>;
}

/// Write and search access to the directory service.
pub trait Directory {
    fn insert_user(&self, body: &UserBody) -> Result<(), DirectoryError>;

    fn update_user(&self, user_key: &str, body: &UserBody) -> Result<(), DirectoryError>;

    fn delete_user(&self, user_key: &str) -> Result<(), DirectoryError>;

    /// Users matching `query`; empty when nothing matches.
    fn list_users(&self, query: &UserQuery) -> Result<Vec<DirectoryUser>, DirectoryError>;
}

impl<T: HrSource + ?Sized> HrSource for &T {
    fn employee_directory(&self) -> Result<Vec<Employee>, HrError> {
        (**self).employee_directory()
    }

    fn changed_employees(
        &self,
        kind: ChangeKind,
        since: &str,
    ) -> Result<Vec<EmployeeId>, HrError> {
        (**self).changed_employees(kind, since)
    }

    fn employee(&self, id: &EmployeeId, fields: &[&str]) -> Result<Employee, HrError> {
        (**self).employee(id, fields)
    }
}

impl<T: Directory + ?Sized> Directory for &T {
    fn insert_user(&self, body: &UserBody) -> Result<(), DirectoryError> {
        (**self).insert_user(body)
    }

    fn update_user(&self, user_key: &str, body: &UserBody) -> Result<(), DirectoryError> {
        (**self).update_user(user_key, body)
    }

    fn delete_user(&self, user_key: &str) -> Result<(), DirectoryError> {
        (**self).delete_user(user_key)
    }

    fn list_users(&self, query: &UserQuery) -> Result<Vec<DirectoryUser>, DirectoryError> {
        (**self).list_users(query)
    }
}
