//! HR → directory field mapping.
//!
//! | Directory member | HR source |
//! |---|---|
//! | `primaryEmail` | `workEmail` |
//! | `name.givenName` | `preferredName`, else `firstName` |
//! | `name.familyName` | `lastName` |
//! | `suspended` | `status != "Active"` |
//! | `emails` | `homeEmail` (type `home`), `workEmail` (primary) |
//! | `relations` | `supervisorEmail` (type `manager`) |
//! | `organizations[0]` | `jobTitle`, `department`, primary |
//! | `externalIds` | `id` (type `organization`) |
//! | `orgUnitPath` | `/` + `department` |

use crate::error::MappingError;
use crate::password::ProvisioningPassword;
use crate::types::{
    Employee, ExternalId, UserBody, UserEmail, UserName, UserOrganization, UserRelation,
};

/// Relation type used for the supervisor link.
pub const MANAGER_RELATION: &str = "manager";

/// Email type used for the personal address.
pub const HOME_EMAIL: &str = "home";

/// `preferredName` when present and non-empty, otherwise `firstName`.
pub fn given_name(employee: &Employee) -> Option<String> {
    non_empty(&employee.preferred_name)
        .or_else(|| non_empty(&employee.first_name))
        .map(str::to_owned)
}

/// Org unit path derived 1:1 from the department name.
pub fn org_unit_path(employee: &Employee) -> String {
    format!("/{}", employee.department.as_deref().unwrap_or_default())
}

/// Body for the full-update backfill: correlation id and org unit only.
pub fn correlation_body(employee: &Employee) -> UserBody {
    UserBody {
        external_ids: Some(vec![ExternalId::organization(&employee.id)]),
        org_unit_path: Some(org_unit_path(employee)),
        ..Default::default()
    }
}

/// Body for inserting a new directory user.
///
/// The caller supplies the provisioning password so that every insert gets a
/// freshly drawn token.
pub fn insert_body(
    employee: &Employee,
    password: ProvisioningPassword,
) -> Result<UserBody, MappingError> {
    require_work_email(employee)?;
    Ok(UserBody {
        password: Some(password),
        change_password_at_next_login: Some(true),
        external_ids: Some(vec![ExternalId::organization(&employee.id)]),
        ..attribute_body(employee)
    })
}

/// Body for updating an existing directory user.
///
/// Never touches the password or the correlation id.
pub fn update_body(employee: &Employee) -> UserBody {
    attribute_body(employee)
}

/// Work email or a [`MappingError`] naming the employee.
pub fn require_work_email(employee: &Employee) -> Result<&str, MappingError> {
    non_empty(&employee.work_email).ok_or_else(|| MappingError::MissingWorkEmail {
        id: employee.id.clone(),
    })
}

fn attribute_body(employee: &Employee) -> UserBody {
    let work_email = non_empty(&employee.work_email).map(str::to_owned);

    let mut emails = Vec::with_capacity(2);
    if let Some(home) = non_empty(&employee.home_email) {
        emails.push(UserEmail {
            address: home.to_owned(),
            kind: Some(HOME_EMAIL.to_owned()),
            primary: None,
        });
    }
    if let Some(work) = &work_email {
        emails.push(UserEmail {
            address: work.clone(),
            kind: None,
            primary: Some(true),
        });
    }

    let relations = non_empty(&employee.supervisor_email)
        .map(|boss| UserRelation {
            value: boss.to_owned(),
            kind: MANAGER_RELATION.to_owned(),
        })
        .into_iter()
        .collect();

    UserBody {
        primary_email: work_email,
        name: Some(UserName {
            given_name: given_name(employee),
            family_name: employee.last_name.clone(),
        }),
        suspended: Some(!employee.is_active()),
        emails: Some(emails),
        relations: Some(relations),
        organizations: Some(vec![UserOrganization {
            title: employee.job_title.clone(),
            primary: true,
            department: employee.department.clone(),
        }]),
        org_unit_path: Some(org_unit_path(employee)),
        ..Default::default()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
