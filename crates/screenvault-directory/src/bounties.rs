use crate::error::Result;
use crate::listing::{fetch, Listing, DEFAULT_PAGE_SIZE};
use crate::query::{Cursor, Direction, Query};
use crate::records::{Bounty, Claim};
use crate::store::{claims_collection, DocumentStore};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

pub const BOUNTIES: &str = "bounties";

/// Bounty board ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BountySort {
    #[default]
    Newest,
    Reward,
}

impl BountySort {
    fn field(self) -> &'static str {
        match self {
            BountySort::Newest => "createdAt",
            BountySort::Reward => "reward",
        }
    }
}

impl FromStr for BountySort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" | "created" => Ok(BountySort::Newest),
            "reward" => Ok(BountySort::Reward),
            other => Err(format!("unknown sort '{}' (expected newest or reward)", other)),
        }
    }
}

/// Read-only view of posted bounties and their claims
pub struct BountyBoard {
    store: Arc<dyn DocumentStore>,
    page_size: usize,
}

impl BountyBoard {
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

    pub fn query(&self, status: Option<&str>, sort: BountySort) -> Query {
        let mut query = Query::collection(BOUNTIES);
        if let Some(status) = status {
            query = query.where_eq_ignore_case("status", status.trim());
        }
        query
            .order_by(sort.field(), Direction::Descending)
            .limit(self.page_size)
    }

    pub async fn list(
        &self,
        status: Option<&str>,
        sort: BountySort,
        cursor: Option<Cursor>,
    ) -> Result<Listing<Bounty>> {
        let query = self.query(status, sort).start_after(cursor);
        let listing = fetch(self.store.as_ref(), &query).await?;
        debug!("Listed {} bounties (status: {:?}, sort: {:?})", listing.len(), status, sort);
        Ok(listing)
    }

    /// Claims on one bounty, most recent first
    pub async fn claims(&self, bounty_id: &str) -> Result<Vec<Claim>> {
        let query = Query::collection(claims_collection(bounty_id))
            .order_by("submittedAt", Direction::Descending);
        Ok(fetch(self.store.as_ref(), &query).await?.items)
    }
}
