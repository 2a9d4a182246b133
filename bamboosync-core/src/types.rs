//! Domain types shared by the HR client, the directory client and the sync
//! engine.
//!
//! HR-side types deserialize from BambooHR's camelCase JSON. Directory-side
//! request bodies serialize to the Admin SDK `users` resource shape, omitting
//! every member that is `None` or empty.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::password::ProvisioningPassword;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// HR-internal employee identifier; the cross-system correlation key.
///
/// BambooHR usually sends ids as strings but some endpoints emit numbers, so
/// both are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for EmployeeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EmployeeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// HR side
// ---------------------------------------------------------------------------

/// The three classes of the HR change feed, processed in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

impl ChangeKind {
    /// Processing order for an incremental sync.
    pub const ORDER: [ChangeKind; 3] = [
        ChangeKind::Inserted,
        ChangeKind::Updated,
        ChangeKind::Deleted,
    ];

    /// Value of the `type` query parameter on the change feed.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Inserted => "inserted",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields requested when fetching a single employee's detail.
pub const EMPLOYEE_DETAIL_FIELDS: [&str; 9] = [
    "workEmail",
    "preferredName",
    "firstName",
    "lastName",
    "status",
    "homeEmail",
    "jobTitle",
    "supervisorEmail",
    "department",
];

/// Status value marking an employee whose account should be enabled.
pub const ACTIVE_STATUS: &str = "Active";

/// An employee record as read from the HR system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: EmployeeId,
    #[serde(default)]
    pub work_email: Option<String>,
    #[serde(default)]
    pub home_email: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub supervisor_email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

impl Employee {
    /// True iff the HR status is exactly `"Active"`.
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(ACTIVE_STATUS)
    }
}

// ---------------------------------------------------------------------------
// Directory side
// ---------------------------------------------------------------------------

/// Type tag of the `externalIds` entry holding the HR id.
pub const EXTERNAL_ID_TYPE: &str = "organization";

/// Customer scope used for every user lookup.
pub const MY_CUSTOMER: &str = "my_customer";

/// A user as returned by the directory's list endpoint. Only the members the
/// sync engine reads are decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub id: String,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub suspended: Option<bool>,
    #[serde(default)]
    pub external_ids: Vec<ExternalId>,
    #[serde(default)]
    pub org_unit_path: Option<String>,
}

impl DirectoryUser {
    /// The HR correlation id stored on this user, if any.
    pub fn correlation_id(&self) -> Option<&str> {
        self.external_ids
            .iter()
            .find(|e| e.kind == EXTERNAL_ID_TYPE)
            .map(|e| e.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalId {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ExternalId {
    /// The `{value: <hr id>, type: "organization"}` correlation entry.
    pub fn organization(id: &EmployeeId) -> Self {
        Self {
            value: id.0.clone(),
            kind: EXTERNAL_ID_TYPE.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEmail {
    pub address: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRelation {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOrganization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Request body for user insert and update calls.
///
/// Every member is optional so the same type expresses the full insert body,
/// the attribute update body, and the two-field correlation backfill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<UserName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<ProvisioningPassword>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_password_at_next_login: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<UserEmail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Vec<UserRelation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<UserOrganization>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_ids: Option<Vec<ExternalId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_unit_path: Option<String>,
}

impl UserBody {
    /// Copy of this body safe to print: the provisioning password, if any,
    /// is replaced by a fixed placeholder.
    pub fn redacted(&self) -> Self {
        Self {
            password: self.password.as_ref().map(|_| ProvisioningPassword::redacted()),
            ..self.clone()
        }
    }
}

/// Parameters of a directory user search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub customer: String,
    pub query: String,
    pub max_results: u32,
}

impl UserQuery {
    /// `externalId=<id>` within `my_customer`, at most one result.
    pub fn by_external_id(id: &EmployeeId) -> Self {
        Self {
            customer: MY_CUSTOMER.to_owned(),
            query: format!("externalId={id}"),
            max_results: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
