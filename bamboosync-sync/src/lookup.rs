//! Correlation lookup: HR id → directory user via `externalIds`.

use bamboosync_core::{Directory, DirectoryUser, EmployeeId, UserQuery};

use crate::error::ResolveError;

/// Find the directory user whose `externalIds` carries `id`.
///
/// Asks for at most one match; a search returning nothing is
/// [`ResolveError::NotFound`].
pub fn resolve_user<D: Directory>(
    directory: &D,
    id: &EmployeeId,
) -> Result<DirectoryUser, ResolveError> {
    let users = directory.list_users(&UserQuery::by_external_id(id))?;
    users
        .into_iter()
        .next()
        .ok_or_else(|| ResolveError::NotFound {
            external_id: id.clone(),
        })
}
