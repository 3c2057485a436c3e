//! The transaction processor, sole writer of tool status and history.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use zagfer_core::{Error, Result};
use zagfer_engine::compute_active_checkouts;
use zagfer_storage::models::{ActionType, HistoryRecord, ToolStatus, User};
use zagfer_storage::store::EntityStore;

/// Input for a new checkout.
///
/// The responsible party is free text entered at the counter; only the
/// dispatcher is a registered user.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub tool_ids: Vec<String>,
    pub responsible_name: String,
    pub responsible_matricula: String,
    pub expected_return_date: Option<DateTime<Utc>>,
}

/// Enforces the checkout/return/renewal protocol over an [`EntityStore`].
///
/// Every loan operation couples a tool status flip with a history append.
/// The processor refuses to run against a store that cannot apply that
/// pair atomically.
#[derive(Debug)]
pub struct TransactionProcessor<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> TransactionProcessor<S> {
    pub fn new(store: S) -> Result<Self> {
        if !store.supports_atomic_apply() {
            return Err(Error::AtomicityNotSupported);
        }
        Ok(Self { store })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check out a set of tools to a responsible party.
    ///
    /// Preconditions: at least one tool id, every id present in the
    /// catalog and currently available, and a named responsible party.
    /// On success every tool flips to unavailable and a `CHECKOUT`
    /// record is appended, as one unit.
    ///
    /// `expected_return_date` is optional: a record without one has an
    /// effective deadline of the checkout timestamp plus 24 hours, so
    /// alert computation always has a bound to work against.
    pub async fn checkout(
        &self,
        request: CheckoutRequest,
        dispatcher: &User,
    ) -> Result<HistoryRecord> {
        if request.tool_ids.is_empty() {
            return Err(Error::validation("Nenhuma ferramenta selecionada"));
        }
        if request.responsible_name.trim().is_empty()
            || request.responsible_matricula.trim().is_empty()
        {
            return Err(Error::validation("Responsável pela retirada não informado"));
        }

        let tools = self.store.list_tools().await?;
        let mut names = Vec::with_capacity(request.tool_ids.len());
        for id in &request.tool_ids {
            let tool = tools
                .iter()
                .find(|t| &t.id == id)
                .ok_or_else(|| Error::not_found("ferramenta", id))?;
            if !tool.is_available() {
                return Err(Error::invalid_state(format!(
                    "Ferramenta {} não está disponível",
                    tool.name
                )));
            }
            names.push(tool.name.clone());
        }

        let record = HistoryRecord::new(
            Uuid::new_v4().to_string(),
            Utc::now(),
            ActionType::Checkout,
            dispatcher.id.clone(),
            dispatcher.name.clone(),
            dispatcher.matricula.clone(),
            request.responsible_name.trim(),
            request.responsible_matricula.trim(),
            request.tool_ids.clone(),
            names.join(", "),
            request.expected_return_date,
        );

        self.store
            .apply_loan_mutation(&request.tool_ids, ToolStatus::Unavailable, &record)
            .await?;

        info!(
            record_id = %record.id,
            tools = request.tool_ids.len(),
            responsible = %record.responsible_matricula,
            "checkout registered"
        );
        Ok(record)
    }

    /// Return some or all tools of an active checkout.
    ///
    /// `tool_ids` must be a non-empty subset of the checkout's pending
    /// tools. The `RETURN` record copies the responsible party from the
    /// originating checkout; partial returns leave the rest pending under
    /// the same checkout.
    pub async fn process_return(
        &self,
        checkout_id: &str,
        tool_ids: &[String],
        dispatcher: &User,
    ) -> Result<HistoryRecord> {
        if tool_ids.is_empty() {
            return Err(Error::validation("Nenhuma ferramenta selecionada"));
        }

        let tools = self.store.list_tools().await?;
        let history = self.store.list_history().await?;
        let active = compute_active_checkouts(&tools, &history);
        let checkout = active
            .iter()
            .find(|c| c.checkout_id() == checkout_id)
            .ok_or_else(|| Error::not_found("retirada ativa", checkout_id))?;

        for id in tool_ids {
            if !checkout.pending_tools.iter().any(|t| &t.id == id) {
                return Err(Error::validation(format!(
                    "Ferramenta {id} não está pendente nesta retirada"
                )));
            }
        }

        let names: Vec<String> = tool_ids
            .iter()
            .filter_map(|id| {
                checkout
                    .pending_tools
                    .iter()
                    .find(|t| &t.id == id)
                    .map(|t| t.name.clone())
            })
            .collect();

        let record = HistoryRecord::new(
            Uuid::new_v4().to_string(),
            Utc::now(),
            ActionType::Return,
            dispatcher.id.clone(),
            dispatcher.name.clone(),
            dispatcher.matricula.clone(),
            checkout.record.responsible_name.clone(),
            checkout.record.responsible_matricula.clone(),
            tool_ids.to_vec(),
            names.join(", "),
            None,
        );

        self.store
            .apply_loan_mutation(tool_ids, ToolStatus::Available, &record)
            .await?;

        info!(
            record_id = %record.id,
            checkout_id,
            tools = tool_ids.len(),
            "return registered"
        );
        Ok(record)
    }

    /// Renew a checkout by replacing its expected return date.
    ///
    /// The only in-place history mutation. The new deadline may be
    /// earlier than the current one; the caller decides what a sensible
    /// deadline is.
    pub async fn renew(&self, checkout_id: &str, new_deadline: DateTime<Utc>) -> Result<()> {
        let history = self.store.list_history().await?;
        let record = history
            .iter()
            .find(|r| r.id == checkout_id)
            .ok_or_else(|| Error::not_found("registro de histórico", checkout_id))?;
        if !record.is_checkout() {
            return Err(Error::invalid_state(
                "Apenas retiradas podem ser renovadas",
            ));
        }

        self.store
            .update_history_deadline(checkout_id, new_deadline)
            .await?;

        info!(checkout_id, deadline = %new_deadline, "deadline renewed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{admin_user, store_with_tools};
    use zagfer_storage::store::MemoryStore;

    fn request(ids: &[&str]) -> CheckoutRequest {
        CheckoutRequest {
            tool_ids: ids.iter().map(|s| s.to_string()).collect(),
            responsible_name: "Bruno Costa".to_string(),
            responsible_matricula: "2002".to_string(),
            expected_return_date: None,
        }
    }

    #[tokio::test]
    async fn checkout_flips_status_and_appends_history() {
        let store = store_with_tools(&[("t1", "Serra"), ("t2", "Alicate")]).await;
        let processor = TransactionProcessor::new(store).unwrap();
        let dispatcher = admin_user();

        let record = processor.checkout(request(&["t1"]), &dispatcher).await.unwrap();
        assert_eq!(record.action_type, ActionType::Checkout);
        assert_eq!(record.tools_summary, "Serra");

        let tools = processor.store().list_tools().await.unwrap();
        let t1 = tools.iter().find(|t| t.id == "t1").unwrap();
        assert_eq!(t1.status, ToolStatus::Unavailable);
        assert_eq!(processor.store().list_history().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn checkout_of_unavailable_tool_is_rejected() {
        let store = store_with_tools(&[("t1", "Serra")]).await;
        let processor = TransactionProcessor::new(store).unwrap();
        let dispatcher = admin_user();

        processor.checkout(request(&["t1"]), &dispatcher).await.unwrap();
        let err = processor.checkout(request(&["t1"]), &dispatcher).await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[tokio::test]
    async fn checkout_with_empty_selection_is_rejected() {
        let store = store_with_tools(&[]).await;
        let processor = TransactionProcessor::new(store).unwrap();

        let err = processor.checkout(request(&[]), &admin_user()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn checkout_with_unknown_tool_is_rejected() {
        let store = store_with_tools(&[("t1", "Serra")]).await;
        let processor = TransactionProcessor::new(store).unwrap();

        let err = processor
            .checkout(request(&["t1", "ghost"]), &admin_user())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        // Nothing was written.
        assert!(processor.store().list_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn return_copies_responsible_from_checkout() {
        let store = store_with_tools(&[("t1", "Serra")]).await;
        let processor = TransactionProcessor::new(store).unwrap();
        let dispatcher = admin_user();

        let checkout = processor.checkout(request(&["t1"]), &dispatcher).await.unwrap();
        let returned = processor
            .process_return(&checkout.id, &["t1".to_string()], &dispatcher)
            .await
            .unwrap();

        assert_eq!(returned.action_type, ActionType::Return);
        assert_eq!(returned.responsible_name, checkout.responsible_name);
        assert_eq!(returned.responsible_matricula, checkout.responsible_matricula);
        assert!(returned.expected_return_date.is_none());
    }

    #[tokio::test]
    async fn returning_a_tool_not_in_the_checkout_is_rejected() {
        let store = store_with_tools(&[("t1", "Serra"), ("t2", "Alicate")]).await;
        let processor = TransactionProcessor::new(store).unwrap();
        let dispatcher = admin_user();

        let checkout = processor.checkout(request(&["t1"]), &dispatcher).await.unwrap();
        let err = processor
            .process_return(&checkout.id, &["t2".to_string()], &dispatcher)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn renewal_may_shorten_the_deadline() {
        let store = store_with_tools(&[("t1", "Serra")]).await;
        let processor = TransactionProcessor::new(store).unwrap();
        let dispatcher = admin_user();

        let mut req = request(&["t1"]);
        req.expected_return_date = Some(Utc::now() + chrono::Duration::hours(48));
        let checkout = processor.checkout(req, &dispatcher).await.unwrap();

        let earlier = Utc::now() + chrono::Duration::hours(2);
        processor.renew(&checkout.id, earlier).await.unwrap();

        let history = processor.store().list_history().await.unwrap();
        let renewed = history.iter().find(|r| r.id == checkout.id).unwrap();
        assert_eq!(renewed.expected_return_date, Some(earlier));
    }

    #[tokio::test]
    async fn renewing_a_return_record_is_rejected() {
        let store = store_with_tools(&[("t1", "Serra")]).await;
        let processor = TransactionProcessor::new(store).unwrap();
        let dispatcher = admin_user();

        let checkout = processor.checkout(request(&["t1"]), &dispatcher).await.unwrap();
        let returned = processor
            .process_return(&checkout.id, &["t1".to_string()], &dispatcher)
            .await
            .unwrap();

        let err = processor.renew(&returned.id, Utc::now()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn non_atomic_store_is_refused() {
        #[derive(Debug)]
        struct SplitStore(MemoryStore);

        impl EntityStore for SplitStore {
            async fn list_tools(&self) -> zagfer_core::Result<Vec<zagfer_storage::models::Tool>> {
                self.0.list_tools().await
            }
            async fn list_users(&self) -> zagfer_core::Result<Vec<User>> {
                self.0.list_users().await
            }
            async fn list_history(&self) -> zagfer_core::Result<Vec<HistoryRecord>> {
                self.0.list_history().await
            }
            async fn find_user_by_matricula(
                &self,
                matricula: &str,
            ) -> zagfer_core::Result<Option<User>> {
                self.0.find_user_by_matricula(matricula).await
            }
            async fn create_tool(
                &self,
                tool: &zagfer_storage::models::Tool,
            ) -> zagfer_core::Result<zagfer_storage::models::Tool> {
                self.0.create_tool(tool).await
            }
            async fn update_tool(
                &self,
                tool: &zagfer_storage::models::Tool,
            ) -> zagfer_core::Result<zagfer_storage::models::Tool> {
                self.0.update_tool(tool).await
            }
            async fn delete_tool(&self, id: &str) -> zagfer_core::Result<()> {
                self.0.delete_tool(id).await
            }
            async fn set_tools_status(
                &self,
                ids: &[String],
                status: ToolStatus,
            ) -> zagfer_core::Result<()> {
                self.0.set_tools_status(ids, status).await
            }
            async fn create_user(&self, user: &User) -> zagfer_core::Result<User> {
                self.0.create_user(user).await
            }
            async fn update_user(&self, user: &User) -> zagfer_core::Result<User> {
                self.0.update_user(user).await
            }
            async fn delete_user(&self, id: &str) -> zagfer_core::Result<()> {
                self.0.delete_user(id).await
            }
            async fn append_history(
                &self,
                record: &HistoryRecord,
            ) -> zagfer_core::Result<HistoryRecord> {
                self.0.append_history(record).await
            }
            async fn update_history_deadline(
                &self,
                id: &str,
                deadline: DateTime<Utc>,
            ) -> zagfer_core::Result<()> {
                self.0.update_history_deadline(id, deadline).await
            }
            fn supports_atomic_apply(&self) -> bool {
                false
            }
            async fn apply_loan_mutation(
                &self,
                ids: &[String],
                status: ToolStatus,
                record: &HistoryRecord,
            ) -> zagfer_core::Result<()> {
                self.0.apply_loan_mutation(ids, status, record).await
            }
        }

        let err = TransactionProcessor::new(SplitStore(MemoryStore::new())).unwrap_err();
        assert!(matches!(err, Error::AtomicityNotSupported));
    }
}
