//! Directory sync engine.
//!
//! Two entry points:
//!
//! - [`SyncEngine::full_update`] backfills the correlation id and org unit on
//!   every existing account, keyed by work email.
//! - [`SyncEngine::incremental_sync`] replays the HR change feed for a window,
//!   strictly in the order inserted → updated → deleted.
//!
//! Each employee is handled in isolation. Directory API error replies,
//! correlation misses and unmappable HR records are reported and the loop
//! moves on; HR failures and non-HTTP directory failures abort the run.
//! Nothing already applied is rolled back.

use bamboosync_core::{
    mapping, ChangeKind, Directory, DirectoryError, EmployeeId, HrSource, ProvisioningPassword,
    UserBody, EMPLOYEE_DETAIL_FIELDS,
};

use crate::error::{ResolveError, SyncError};
use crate::lookup::resolve_user;
use crate::report::{Record, Reporter};
use crate::window::ChangeWindow;

/// Run-wide switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Read from both systems but skip insert/update/delete calls.
    pub dry_run: bool,
}

/// Per-run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Directory errors and correlation misses.
    pub failed: usize,
    /// HR records that could not be mapped to a directory request.
    pub skipped: usize,
}

/// What happened to a single employee.
enum Outcome {
    Applied,
    Failed,
    Skipped,
}

/// Reconciles HR state into the directory.
pub struct SyncEngine<H, D> {
    hr: H,
    directory: D,
    options: SyncOptions,
}

impl<H: HrSource, D: Directory> SyncEngine<H, D> {
    pub fn new(hr: H, directory: D, options: SyncOptions) -> Self {
        Self {
            hr,
            directory,
            options,
        }
    }

    // -----------------------------------------------------------------------
    // Full update
    // -----------------------------------------------------------------------

    /// Set `externalIds` and `orgUnitPath` on the account of every employee in
    /// the HR directory. Accounts are addressed by work email and must exist.
    pub fn full_update<R: Reporter>(&self, reporter: &mut R) -> Result<SyncSummary, SyncError> {
        let employees = self.hr.employee_directory()?;
        tracing::info!(count = employees.len(), "backfilling correlation ids");

        let mut summary = SyncSummary::default();
        for employee in &employees {
            let user_key = match mapping::require_work_email(employee) {
                Ok(email) => email.to_owned(),
                Err(err) => {
                    self.report_cause(reporter, err.to_string())?;
                    summary.skipped += 1;
                    continue;
                }
            };
            let body = mapping::correlation_body(employee);
            match self.apply_update(reporter, &user_key, &body)? {
                Outcome::Applied => summary.updated += 1,
                Outcome::Failed => summary.failed += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }
        Ok(summary)
    }

    // -----------------------------------------------------------------------
    // Incremental sync
    // -----------------------------------------------------------------------

    /// Apply every HR change inside `window`.
    pub fn incremental_sync<R: Reporter>(
        &self,
        window: &ChangeWindow,
        reporter: &mut R,
    ) -> Result<SyncSummary, SyncError> {
        let since = window.since_param();
        let mut summary = SyncSummary::default();

        for kind in ChangeKind::ORDER {
            let ids = self.hr.changed_employees(kind, &since)?;
            tracing::info!(%kind, %since, count = ids.len(), "processing change feed");
            for id in &ids {
                let outcome = match kind {
                    ChangeKind::Inserted => self.insert_employee(reporter, id)?,
                    ChangeKind::Updated => self.update_employee(reporter, id)?,
                    ChangeKind::Deleted => self.delete_employee(reporter, id)?,
                };
                match (kind, outcome) {
                    (_, Outcome::Failed) => summary.failed += 1,
                    (_, Outcome::Skipped) => summary.skipped += 1,
                    (ChangeKind::Inserted, Outcome::Applied) => summary.inserted += 1,
                    (ChangeKind::Updated, Outcome::Applied) => summary.updated += 1,
                    (ChangeKind::Deleted, Outcome::Applied) => summary.deleted += 1,
                }
            }
        }
        Ok(summary)
    }

    fn insert_employee<R: Reporter>(
        &self,
        reporter: &mut R,
        id: &EmployeeId,
    ) -> Result<Outcome, SyncError> {
        let employee = self.hr.employee(id, &EMPLOYEE_DETAIL_FIELDS)?;
        let body = match mapping::insert_body(&employee, ProvisioningPassword::generate()) {
            Ok(body) => body,
            Err(err) => {
                self.report_cause(reporter, err.to_string())?;
                return Ok(Outcome::Skipped);
            }
        };

        if !self.options.dry_run {
            if let Err(err) = self.directory.insert_user(&body) {
                self.report_directory_error(reporter, err, None, Some(&body))?;
                return Ok(Outcome::Failed);
            }
        }
        tracing::info!(
            %id,
            primary_email = ?body.primary_email,
            dry_run = self.options.dry_run,
            "inserted user"
        );
        reporter.report(Record::insert(&body, self.options.dry_run))?;
        Ok(Outcome::Applied)
    }

    fn update_employee<R: Reporter>(
        &self,
        reporter: &mut R,
        id: &EmployeeId,
    ) -> Result<Outcome, SyncError> {
        let employee = self.hr.employee(id, &EMPLOYEE_DETAIL_FIELDS)?;
        let Some(user_id) = self.resolve(reporter, id)? else {
            return Ok(Outcome::Failed);
        };
        let body = mapping::update_body(&employee);
        self.apply_update(reporter, &user_id, &body)
    }

    fn delete_employee<R: Reporter>(
        &self,
        reporter: &mut R,
        id: &EmployeeId,
    ) -> Result<Outcome, SyncError> {
        let Some(user_id) = self.resolve(reporter, id)? else {
            return Ok(Outcome::Failed);
        };

        if !self.options.dry_run {
            if let Err(err) = self.directory.delete_user(&user_id) {
                self.report_directory_error(reporter, err, Some(&user_id), None)?;
                return Ok(Outcome::Failed);
            }
        }
        tracing::info!(
            %id,
            user_key = %user_id,
            dry_run = self.options.dry_run,
            "deleted user"
        );
        reporter.report(Record::delete(&user_id, self.options.dry_run))?;
        Ok(Outcome::Applied)
    }

    // -----------------------------------------------------------------------
    // Shared steps
    // -----------------------------------------------------------------------

    fn apply_update<R: Reporter>(
        &self,
        reporter: &mut R,
        user_key: &str,
        body: &UserBody,
    ) -> Result<Outcome, SyncError> {
        if !self.options.dry_run {
            if let Err(err) = self.directory.update_user(user_key, body) {
                self.report_directory_error(reporter, err, Some(user_key), Some(body))?;
                return Ok(Outcome::Failed);
            }
        }
        tracing::info!(%user_key, dry_run = self.options.dry_run, "updated user");
        reporter.report(Record::update(user_key, body, self.options.dry_run))?;
        Ok(Outcome::Applied)
    }

    /// Directory user id for `id`, or `None` after reporting why it could not
    /// be resolved.
    fn resolve<R: Reporter>(
        &self,
        reporter: &mut R,
        id: &EmployeeId,
    ) -> Result<Option<String>, SyncError> {
        match resolve_user(&self.directory, id) {
            Ok(user) => Ok(Some(user.id)),
            Err(err @ ResolveError::NotFound { .. }) => {
                self.report_cause(reporter, err.to_string())?;
                Ok(None)
            }
            Err(ResolveError::Directory(err)) => {
                self.report_directory_error(reporter, err, None, None)?;
                Ok(None)
            }
        }
    }

    /// Report a recoverable directory error; anything else aborts the run.
    fn report_directory_error<R: Reporter>(
        &self,
        reporter: &mut R,
        err: DirectoryError,
        user_key: Option<&str>,
        body: Option<&UserBody>,
    ) -> Result<(), SyncError> {
        match err {
            DirectoryError::Api(api) => {
                tracing::warn!(
                    status = api.status_code,
                    reason = %api.reason,
                    user_key = user_key.unwrap_or_default(),
                    "directory request failed"
                );
                reporter.report(Record::api_error(api, user_key, body))?;
                Ok(())
            }
            fatal => Err(SyncError::Directory(fatal)),
        }
    }

    fn report_cause<R: Reporter>(&self, reporter: &mut R, cause: String) -> Result<(), SyncError> {
        tracing::warn!(%cause, "skipping employee");
        reporter.report(Record::cause(cause))?;
        Ok(())
    }
}
