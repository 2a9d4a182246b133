//! Typed [`HrSource`] reads on top of [`BambooClient::get`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use bamboosync_core::{ChangeKind, Employee, EmployeeId, HrError, HrSource};

use crate::client::BambooClient;

pub const DIRECTORY_PATH: &str = "/employees/directory";
pub const CHANGED_PATH: &str = "/employees/changed";

#[derive(Debug, Deserialize)]
struct DirectoryResponse {
    #[serde(default)]
    employees: Vec<Employee>,
}

#[derive(Debug, Deserialize)]
struct ChangedResponse {
    #[serde(default)]
    employees: Option<ChangedEmployees>,
}

/// BambooHR returns an object keyed by employee id; a bare id list is
/// accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChangedEmployees {
    Keyed(BTreeMap<String, Value>),
    Ids(Vec<EmployeeId>),
}

impl ChangedEmployees {
    fn into_ids(self) -> Vec<EmployeeId> {
        match self {
            ChangedEmployees::Keyed(map) => map.into_keys().map(EmployeeId::from).collect(),
            ChangedEmployees::Ids(ids) => ids,
        }
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, HrError> {
    serde_json::from_value(value).map_err(|source| HrError::Decode {
        path: path.to_owned(),
        source,
    })
}

impl HrSource for BambooClient {
    fn employee_directory(&self) -> Result<Vec<Employee>, HrError> {
        let value = self.get(DIRECTORY_PATH, &[])?;
        let response: DirectoryResponse = decode(DIRECTORY_PATH, value)?;
        tracing::debug!(count = response.employees.len(), "fetched employee directory");
        Ok(response.employees)
    }

    fn changed_employees(
        &self,
        kind: ChangeKind,
        since: &str,
    ) -> Result<Vec<EmployeeId>, HrError> {
        let value = self.get(CHANGED_PATH, &[("type", kind.as_str()), ("since", since)])?;
        let response: ChangedResponse = decode(CHANGED_PATH, value)?;
        let ids = response
            .employees
            .map(ChangedEmployees::into_ids)
            .unwrap_or_default();
        tracing::debug!(%kind, count = ids.len(), "fetched change feed");
        Ok(ids)
    }

    fn employee(&self, id: &EmployeeId, fields: &[&str]) -> Result<Employee, HrError> {
        let path = format!("/employees/{id}");
        let fields = fields.join(",");
        let value = self.get(&path, &[("fields", fields.as_str())])?;
        let mut employee: Employee = decode(&path, value)?;
        if employee.id.is_empty() {
            employee.id = id.clone();
        }
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keyed_change_feed_yields_ids() {
        let response: ChangedResponse = serde_json::from_value(json!({
            "latest": "2026-10-15T10:00:00+00:00",
            "employees": {
                "7": {"id": "7", "action": "Inserted", "lastChanged": "2026-10-15T09:00:00+00:00"},
                "12": {"id": "12", "action": "Inserted", "lastChanged": "2026-10-15T09:30:00+00:00"}
            }
        }))
        .expect("decode");
        let mut ids = response.employees.map(ChangedEmployees::into_ids).unwrap_or_default();
        ids.sort();
        assert_eq!(ids, vec![EmployeeId::from("12"), EmployeeId::from("7")]);
    }

    #[test]
    fn list_change_feed_yields_ids() {
        let response: ChangedResponse =
            serde_json::from_value(json!({"employees": ["1", 2]})).expect("decode");
        let ids = response.employees.map(ChangedEmployees::into_ids).unwrap_or_default();
        assert_eq!(ids, vec![EmployeeId::from("1"), EmployeeId::from("2")]);
    }

    #[test]
    fn null_or_missing_change_feed_is_empty() {
        for payload in [json!({"employees": null}), json!({})] {
            let response: ChangedResponse = serde_json::from_value(payload).expect("decode");
            assert!(response.employees.is_none());
        }
    }
}
