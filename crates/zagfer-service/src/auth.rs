//! Matricula-based login and role checks.
//!
//! There is no session or token model; callers carry the acting user's
//! matricula and every privileged operation re-checks the role.

use tracing::info;
use zagfer_core::{Error, Result};
use zagfer_storage::models::User;
use zagfer_storage::store::EntityStore;

/// Privileged operations gated on the acting user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create, update, deactivate or delete users
    ManageUsers,
    /// Create, update or delete catalog tools
    ManageTools,
    /// Export history or catalog tables as CSV
    ExportCsv,
    /// Register checkouts, returns and renewals
    OperateLoans,
}

/// Whether `user` may perform `action`. Loan operations are open to every
/// active user; everything else is admin-only.
pub fn can_perform(user: &User, action: Action) -> bool {
    match action {
        Action::OperateLoans => true,
        Action::ManageUsers | Action::ManageTools | Action::ExportCsv => user.role.is_admin(),
    }
}

/// [`can_perform`] as a guard, failing with `Error::Forbidden`.
pub fn ensure_can(user: &User, action: Action) -> Result<()> {
    if can_perform(user, action) {
        Ok(())
    } else {
        Err(Error::Forbidden(format!(
            "Usuário {} não tem permissão para esta operação",
            user.matricula
        )))
    }
}

/// Resolve a matricula to its active user.
///
/// Unknown matriculas and deactivated accounts both fail; a deactivated
/// user keeps their history but can no longer operate the counter.
pub async fn login(store: &impl EntityStore, matricula: &str) -> Result<User> {
    let user = store
        .find_user_by_matricula(matricula.trim())
        .await?
        .ok_or_else(|| Error::not_found("usuário", matricula))?;

    if !user.active {
        return Err(Error::invalid_state("Usuário desativado"));
    }

    info!(matricula = %user.matricula, role = user.role.as_str(), "login");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{admin_user, plain_user};
    use rstest::rstest;
    use zagfer_storage::store::MemoryStore;

    #[rstest]
    #[case(Action::ManageUsers, false)]
    #[case(Action::ManageTools, false)]
    #[case(Action::ExportCsv, false)]
    #[case(Action::OperateLoans, true)]
    fn plain_users_may_only_operate_loans(#[case] action: Action, #[case] allowed: bool) {
        assert_eq!(can_perform(&plain_user(), action), allowed);
    }

    #[rstest]
    #[case(Action::ManageUsers)]
    #[case(Action::ManageTools)]
    #[case(Action::ExportCsv)]
    #[case(Action::OperateLoans)]
    fn admins_may_do_everything(#[case] action: Action) {
        assert!(can_perform(&admin_user(), action));
        assert!(ensure_can(&admin_user(), action).is_ok());
    }

    #[tokio::test]
    async fn login_resolves_active_user() {
        let store = MemoryStore::new();
        store.create_user(&plain_user()).await.unwrap();

        let user = login(&store, "2002").await.unwrap();
        assert_eq!(user.matricula, "2002");
    }

    #[tokio::test]
    async fn unknown_matricula_fails() {
        let store = MemoryStore::new();
        let err = login(&store, "9999").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn deactivated_user_cannot_login() {
        let store = MemoryStore::new();
        let mut user = plain_user();
        user.active = false;
        store.create_user(&user).await.unwrap();

        let err = login(&store, &user.matricula).await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }
}
