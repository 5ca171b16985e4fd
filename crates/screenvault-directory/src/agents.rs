use crate::error::Result;
use crate::listing::{fetch, Listing, DEFAULT_PAGE_SIZE};
use crate::query::{Cursor, Direction, Query};
use crate::records::{Agent, FromDocument};
use crate::store::DocumentStore;
use std::sync::Arc;
use tracing::debug;

pub const AGENTS: &str = "agents";

/// Narrowing applied to the agent directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentFilter {
    pub verified_only: bool,
    pub skill: Option<String>,
}

/// Read-only view of registered agents, best reputation first
pub struct AgentDirectory {
    store: Arc<dyn DocumentStore>,
    page_size: usize,
}

impl AgentDirectory {
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

    pub fn query(&self, filter: &AgentFilter) -> Query {
        let mut query = Query::collection(AGENTS);
        if filter.verified_only {
            query = query.where_eq("verified", true);
        }
        if let Some(skill) = &filter.skill {
            query = query.where_contains("skills", skill.as_str());
        }
        query
            .order_by("reputation", Direction::Descending)
            .limit(self.page_size)
    }

    /// One page of agents, starting after `cursor`
    pub async fn list(
        &self,
        filter: &AgentFilter,
        cursor: Option<Cursor>,
    ) -> Result<Listing<Agent>> {
        let query = self.query(filter).start_after(cursor);
        let listing = fetch(self.store.as_ref(), &query).await?;
        debug!("Listed {} agents (filter: {:?})", listing.len(), filter);
        Ok(listing)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Agent>> {
        Ok(self
            .store
            .get(AGENTS, id)
            .await?
            .as_ref()
            .map(Agent::from_document))
    }
}
