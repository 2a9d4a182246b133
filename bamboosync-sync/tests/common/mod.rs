//! In-memory HR and directory fakes shared by the reconciliation tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use bamboosync_core::{
    ApiError, ChangeKind, Directory, DirectoryError, DirectoryUser, Employee, EmployeeId,
    ExternalId, HrError, HrSource, UserBody, UserQuery,
};

// ---------------------------------------------------------------------------
// HR
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeHr {
    pub directory: Vec<Employee>,
    pub changes: HashMap<ChangeKind, Vec<EmployeeId>>,
    pub employees: HashMap<EmployeeId, Employee>,
    pub feed_requests: RefCell<Vec<(ChangeKind, String)>>,
    pub detail_requests: RefCell<Vec<EmployeeId>>,
}

impl FakeHr {
    pub fn with_change(mut self, kind: ChangeKind, employee: Employee) -> Self {
        self.changes
            .entry(kind)
            .or_default()
            .push(employee.id.clone());
        self.employees.insert(employee.id.clone(), employee);
        self
    }

    pub fn with_deleted(mut self, id: &str) -> Self {
        self.changes
            .entry(ChangeKind::Deleted)
            .or_default()
            .push(EmployeeId::from(id));
        self
    }
}

impl HrSource for FakeHr {
    fn employee_directory(&self) -> Result<Vec<Employee>, HrError> {
        Ok(self.directory.clone())
    }

    fn changed_employees(
        &self,
        kind: ChangeKind,
        since: &str,
    ) -> Result<Vec<EmployeeId>, HrError> {
        self.feed_requests
            .borrow_mut()
            .push((kind, since.to_owned()));
        Ok(self.changes.get(&kind).cloned().unwrap_or_default())
    }

    fn employee(&self, id: &EmployeeId, _fields: &[&str]) -> Result<Employee, HrError> {
        self.detail_requests.borrow_mut().push(id.clone());
        self.employees
            .get(id)
            .cloned()
            .ok_or_else(|| HrError::Status {
                path: format!("/employees/{id}"),
                status: 404,
                body: String::new(),
            })
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Insert(UserBody),
    Update(String, UserBody),
    Delete(String),
    List(String),
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Api(u16),
    Transport,
}

impl Failure {
    fn into_error(self) -> DirectoryError {
        match self {
            Failure::Api(status) => DirectoryError::Api(ApiError {
                status_code: status,
                reason: format!("status {status}"),
                error_details: serde_json::json!([{"reason": "injected"}]),
            }),
            Failure::Transport => DirectoryError::Transport("connection reset".into()),
        }
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    pub users: Vec<DirectoryUser>,
    /// Keyed by user key, or by primary email for inserts, or by the
    /// `externalId=` query for lookups.
    pub failures: HashMap<String, Failure>,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeDirectory {
    pub fn with_user(mut self, user_id: &str, external_id: &str) -> Self {
        self.users.push(DirectoryUser {
            id: user_id.to_owned(),
            external_ids: vec![ExternalId::organization(&EmployeeId::from(external_id))],
            ..Default::default()
        });
        self
    }

    pub fn failing(mut self, key: &str, failure: Failure) -> Self {
        self.failures.insert(key.to_owned(), failure);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List(_)))
            .collect()
    }

    fn check(&self, key: &str) -> Result<(), DirectoryError> {
        match self.failures.get(key) {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }
}

impl Directory for FakeDirectory {
    fn insert_user(&self, body: &UserBody) -> Result<(), DirectoryError> {
        self.calls.borrow_mut().push(Call::Insert(body.clone()));
        self.check(body.primary_email.as_deref().unwrap_or_default())
    }

    fn update_user(&self, user_key: &str, body: &UserBody) -> Result<(), DirectoryError> {
        self.calls
            .borrow_mut()
            .push(Call::Update(user_key.to_owned(), body.clone()));
        self.check(user_key)
    }

    fn delete_user(&self, user_key: &str) -> Result<(), DirectoryError> {
        self.calls
            .borrow_mut()
            .push(Call::Delete(user_key.to_owned()));
        self.check(user_key)
    }

    fn list_users(&self, query: &UserQuery) -> Result<Vec<DirectoryUser>, DirectoryError> {
        self.calls
            .borrow_mut()
            .push(Call::List(query.query.clone()));
        self.check(&query.query)?;
        let wanted = query.query.strip_prefix("externalId=").unwrap_or_default();
        Ok(self
            .users
            .iter()
            .filter(|u| u.correlation_id() == Some(wanted))
            .take(query.max_results as usize)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn employee(id: &str, email: &str) -> Employee {
    Employee {
        id: EmployeeId::from(id),
        work_email: Some(email.to_owned()),
        home_email: Some(format!("{id}@home.com")),
        preferred_name: None,
        first_name: Some("First".into()),
        last_name: Some("Last".into()),
        status: Some("Active".into()),
        job_title: Some("Eng".into()),
        supervisor_email: Some("boss@co.com".into()),
        department: Some("Engineering".into()),
    }
}
