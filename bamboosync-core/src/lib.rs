//! bamboosync core library: domain types, field mapping, collaborator seams.
//!
//! - [`types`]: HR employees, directory users and request bodies
//! - [`mapping`]: HR → directory field mapping
//! - [`password`]: provisioning password generation
//! - [`ports`]: [`HrSource`] and [`Directory`] traits
//! - [`error`]: [`HrError`], [`DirectoryError`], [`MappingError`]

pub mod error;
pub mod mapping;
pub mod password;
pub mod ports;
pub mod types;

pub use error::{ApiError, DirectoryError, HrError, MappingError};
pub use password::ProvisioningPassword;
pub use ports::{Directory, HrSource};
pub use types::{
    ChangeKind, DirectoryUser, Employee, EmployeeId, ExternalId, UserBody, UserEmail, UserName,
    UserOrganization, UserQuery, UserRelation, EMPLOYEE_DETAIL_FIELDS,
};
