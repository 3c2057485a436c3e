//! Service layer for the ZAGFER tool room tracker.
//!
//! Sits between the HTTP surface and the entity store:
//!
//! - [`TransactionProcessor`] - the checkout/return/renewal protocol,
//!   sole writer of tool status and history
//! - [`auth`] - matricula login and role-gated authorization
//! - [`UserAdmin`] / [`ToolCatalog`] - admin-only roster and catalog
//!   management

pub mod admin;
pub mod auth;
pub mod processor;

pub use admin::{NewTool, NewUser, ToolCatalog, ToolUpdate, UserAdmin, UserUpdate};
pub use auth::{Action, can_perform, ensure_can, login};
pub use processor::{CheckoutRequest, TransactionProcessor};

#[cfg(test)]
pub(crate) mod testutil {
    use zagfer_storage::models::{Role, Tool, User};
    use zagfer_storage::store::{EntityStore, MemoryStore};

    pub fn admin_user() -> User {
        User::new("u-admin", "Ana Lima", "1001", Role::Admin)
    }

    pub fn plain_user() -> User {
        User::new("u-plain", "Bruno Costa", "2002", Role::User)
    }

    pub async fn store_with_tools(tools: &[(&str, &str)]) -> MemoryStore {
        let store = MemoryStore::new();
        for (id, name) in tools {
            let tool = Tool::new(*id, *name, "Manual", "Almoxarifado A");
            store
                .create_tool(&tool)
                .await
                .expect("fresh store accepts new tools");
        }
        store
    }
}
