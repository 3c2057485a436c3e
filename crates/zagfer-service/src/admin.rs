//! Admin-only management of the user roster and the tool catalog.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use zagfer_core::{Error, Matricula, Result};
use zagfer_storage::models::{Role, Tool, User};
use zagfer_storage::store::EntityStore;

use crate::auth::{Action, ensure_can};

/// Input for a new roster entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub matricula: String,
    pub role: Role,
}

/// Fields an admin may change on an existing user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub active: Option<bool>,
}

/// Input for a new catalog tool.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTool {
    pub name: String,
    pub category: String,
    pub size: Option<String>,
    pub bmp: Option<String>,
    pub sector: String,
}

/// Fields an admin may change on an existing tool. Status is absent on
/// purpose; only the transaction processor flips it.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub bmp: Option<String>,
    pub sector: Option<String>,
}

/// Roster management, gated on [`Action::ManageUsers`].
pub struct UserAdmin<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> UserAdmin<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, acting: &User, input: NewUser) -> Result<User> {
        ensure_can(acting, Action::ManageUsers)?;

        if input.name.trim().is_empty() {
            return Err(Error::validation("Nome do usuário não informado"));
        }
        let matricula: Matricula = input.matricula.parse()?;
        if self
            .store
            .find_user_by_matricula(matricula.as_str())
            .await?
            .is_some()
        {
            return Err(Error::validation(format!(
                "Matrícula {matricula} já cadastrada"
            )));
        }

        let user = User::new(
            Uuid::new_v4().to_string(),
            input.name.trim(),
            matricula.as_str(),
            input.role,
        );
        let created = self.store.create_user(&user).await?;
        info!(matricula = %created.matricula, role = created.role.as_str(), "user created");
        Ok(created)
    }

    /// Apply a partial update. Deactivating your own account is rejected;
    /// everything else about yourself may still be edited.
    pub async fn update(&self, acting: &User, id: &str, update: UserUpdate) -> Result<User> {
        ensure_can(acting, Action::ManageUsers)?;

        let users = self.store.list_users().await?;
        let mut user = users
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| Error::not_found("usuário", id))?;

        if update.active == Some(false) && acting.id == user.id {
            return Err(Error::invalid_state(
                "Você não pode desativar seu próprio usuário",
            ));
        }

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(Error::validation("Nome do usuário não informado"));
            }
            user.name = name.trim().to_string();
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(active) = update.active {
            user.active = active;
        }
        user.updated_at = chrono::Utc::now();

        self.store.update_user(&user).await
    }

    pub async fn delete(&self, acting: &User, id: &str) -> Result<()> {
        ensure_can(acting, Action::ManageUsers)?;

        if acting.id == id {
            return Err(Error::invalid_state(
                "Você não pode excluir seu próprio usuário",
            ));
        }

        self.store.delete_user(id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }
}

/// Catalog management, gated on [`Action::ManageTools`].
///
/// Never touches `Tool.status`; the transaction processor is the sole
/// status writer.
pub struct ToolCatalog<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> ToolCatalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, acting: &User, input: NewTool) -> Result<Tool> {
        ensure_can(acting, Action::ManageTools)?;

        if input.name.trim().is_empty() {
            return Err(Error::validation("Nome da ferramenta não informado"));
        }

        let mut tool = Tool::new(
            Uuid::new_v4().to_string(),
            input.name.trim(),
            input.category.trim(),
            input.sector.trim(),
        );
        tool.size = input.size;
        tool.bmp = input.bmp;

        let created = self.store.create_tool(&tool).await?;
        info!(tool_id = %created.id, name = %created.name, "tool created");
        Ok(created)
    }

    pub async fn update(&self, acting: &User, id: &str, update: ToolUpdate) -> Result<Tool> {
        ensure_can(acting, Action::ManageTools)?;

        let tools = self.store.list_tools().await?;
        let mut tool = tools
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::not_found("ferramenta", id))?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(Error::validation("Nome da ferramenta não informado"));
            }
            tool.name = name.trim().to_string();
        }
        if let Some(category) = update.category {
            tool.category = category.trim().to_string();
        }
        if let Some(sector) = update.sector {
            tool.sector = sector.trim().to_string();
        }
        if update.size.is_some() {
            tool.size = update.size;
        }
        if update.bmp.is_some() {
            tool.bmp = update.bmp;
        }
        tool.updated_at = chrono::Utc::now();

        self.store.update_tool(&tool).await
    }

    /// Remove a tool from the catalog. History rows referencing it stay
    /// untouched and render under the removed-tool placeholder.
    pub async fn delete(&self, acting: &User, id: &str) -> Result<()> {
        ensure_can(acting, Action::ManageTools)?;
        self.store.delete_tool(id).await?;
        info!(tool_id = id, "tool deleted");
        Ok(())
    }
}
