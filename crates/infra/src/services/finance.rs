use tracing::info;

use workhub_access::{Action, TransactionScope};
use workhub_auth::Principal;
use workhub_core::DomainResult;
use workhub_finance::{
    DashboardTotals, DateWindow, NewTransaction, SummaryReport, Transaction, dashboard_totals, summarize,
};

use super::{HubServices, guard};
use crate::store::HubStore;

impl<S: HubStore> HubServices<S> {
    pub async fn create_transaction(
        &self,
        principal: &Principal,
        input: NewTransaction,
    ) -> DomainResult<Transaction> {
        guard(principal, &Action::CreateTransaction(input.kind))?;
        let tx = input.into_transaction(principal.company_id, principal.user_id);
        self.store.insert_transaction(&tx).await?;
        info!(transaction_id = %tx.id, kind = tx.kind.as_str(), "transaction recorded");
        Ok(tx)
    }

    /// Newest first; owners see the company, employees their own records.
    pub async fn transactions(&self, principal: &Principal) -> DomainResult<Vec<Transaction>> {
        Ok(self
            .store
            .transactions(TransactionScope::for_principal(principal), None)
            .await?)
    }

    /// Company-wide totals. Owners only.
    pub async fn dashboard(&self, principal: &Principal) -> DomainResult<DashboardTotals> {
        guard(principal, &Action::ViewDashboard)?;
        let rows = self
            .store
            .transactions(TransactionScope::Company(principal.company_id), None)
            .await?;
        dashboard_totals(&rows)
    }

    /// Totals and per-category breakdown over the caller's visible rows.
    pub async fn summary(&self, principal: &Principal, window: DateWindow) -> DomainResult<SummaryReport> {
        let rows = self
            .store
            .transactions(TransactionScope::for_principal(principal), Some(window))
            .await?;
        summarize(&rows)
    }
}
