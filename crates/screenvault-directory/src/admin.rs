use crate::agents::AGENTS;
use crate::bounties::BOUNTIES;
use crate::error::Result;
use crate::listing::{fetch, Listing, DEFAULT_PAGE_SIZE};
use crate::query::{Cursor, Direction, Query};
use crate::records::{Deposit, Escrow, FromDocument, Withdrawal};
use crate::store::DocumentStore;
use crate::waitlist::WAITLIST;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const ESCROWS: &str = "escrows";
pub const DEPOSITS: &str = "deposits";
pub const WITHDRAWALS: &str = "withdrawals";

/// Headline numbers for the admin overview
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub agents: usize,
    pub bounties: usize,
    pub escrows: usize,
    pub deposits: usize,
    pub withdrawals: usize,
    pub waitlist: usize,
}

/// Admin views over every collection
pub struct AdminDashboard {
    store: Arc<dyn DocumentStore>,
    page_size: usize,
}

impl AdminDashboard {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Collection counts; a failing count reads as 0 and is logged
    pub async fn stats(&self) -> DashboardStats {
        let stats = DashboardStats {
            agents: self.count_or_zero(AGENTS).await,
            bounties: self.count_or_zero(BOUNTIES).await,
            escrows: self.count_or_zero(ESCROWS).await,
            deposits: self.count_or_zero(DEPOSITS).await,
            withdrawals: self.count_or_zero(WITHDRAWALS).await,
            waitlist: self.count_or_zero(WAITLIST).await,
        };
        info!("Dashboard stats: {:?}", stats);
        stats
    }

    async fn count_or_zero(&self, collection: &str) -> usize {
        match self.store.count(collection).await {
            Ok(n) => n,
            Err(e) => {
                warn!("Failed to count '{}': {}", collection, e);
                0
            }
        }
    }

    pub async fn escrows(&self, cursor: Option<Cursor>) -> Result<Listing<Escrow>> {
        self.table(ESCROWS, cursor).await
    }

    pub async fn deposits(&self, cursor: Option<Cursor>) -> Result<Listing<Deposit>> {
        self.table(DEPOSITS, cursor).await
    }

    pub async fn withdrawals(&self, cursor: Option<Cursor>) -> Result<Listing<Withdrawal>> {
        self.table(WITHDRAWALS, cursor).await
    }

    /// Newest-first query used by every admin table
    pub fn table_query(&self, collection: &str) -> Query {
        Query::collection(collection)
            .order_by("createdAt", Direction::Descending)
            .limit(self.page_size)
    }

    async fn table<T: FromDocument>(
        &self,
        collection: &str,
        cursor: Option<Cursor>,
    ) -> Result<Listing<T>> {
        let query = self.table_query(collection).start_after(cursor);
        fetch(self.store.as_ref(), &query).await
    }
}
