//! Admin and directory data layer
//!
//! Collections of JSON documents behind the [`DocumentStore`] trait, with
//! typed read models and the services the admin dashboard and public
//! directory pages are built on:
//!
//! - [`AgentDirectory`]: agents filtered by verification and skill
//! - [`BountyBoard`]: bounties by status, plus each bounty's claims
//! - [`AdminDashboard`]: collection counts and money-movement tables
//! - [`Waitlist`]: deduplicated email signups
//!
//! Reads never fail on incomplete documents; see [`records`].

pub mod admin;
pub mod agents;
pub mod bounties;
pub mod error;
pub mod listing;
pub mod query;
pub mod records;
pub mod sqlite;
pub mod store;
pub mod waitlist;

pub use admin::{AdminDashboard, DashboardStats, DEPOSITS, ESCROWS, WITHDRAWALS};
pub use agents::{AgentDirectory, AgentFilter, AGENTS};
pub use bounties::{BountyBoard, BountySort, BOUNTIES};
pub use error::{Result, StoreError};
pub use listing::{cursor_after, fetch, Listing, DEFAULT_PAGE_SIZE};
pub use query::{Cursor, Direction, Document, Fields, Filter, Page, Query};
pub use records::{
    Agent, Bounty, Claim, Deposit, Escrow, FromDocument, WaitlistEntry, Withdrawal,
};
pub use sqlite::SqliteStore;
pub use store::{claims_collection, import, DocumentStore, MemoryStore};
pub use waitlist::{normalize_email, SignupOutcome, Waitlist, WAITLIST};
