use crate::cli::{
    AgentsAction, BountiesAction, Command, PackageArgs, PageArgs, Table, WaitlistAction,
};
use crate::config::Config;
use anyhow::{Context, Result};
use screenvault_catalog::{Catalog, JsonFileSource};
use screenvault_directory::{
    cursor_after, import, AdminDashboard, AgentDirectory, AgentFilter, BountyBoard, BountySort,
    Cursor, DocumentStore, Listing, Query, SignupOutcome, SqliteStore, Waitlist,
};
use screenvault_patterns::{classify, PatternLibrary};
use screenvault_skills::{validate, Packager, Skill};
use screenvault_types::Classification;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one CLI command against the loaded configuration
pub struct CommandService {
    config: Config,
}

impl CommandService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(self, command: Command) -> Result<ExitCode> {
        match command {
            Command::Routes { json } => self.routes(json),
            Command::Patterns {
                section,
                slug,
                json,
            } => self.patterns(section.as_deref(), slug.as_deref(), json),
            Command::Classify { rate, label } => classify_rate(rate, &label),
            Command::Package(args) => self.package(args),
            Command::Waitlist { action } => self.waitlist(action).await,
            Command::Agents { action } => self.agents(action).await,
            Command::Bounties { action } => self.bounties(action).await,
            Command::Dashboard { table, page } => self.dashboard(table, page).await,
            Command::Import { collection, file } => self.import(&collection, file).await,
        }
    }

    fn load_catalog(&self) -> Result<Catalog> {
        let source = JsonFileSource::new(&self.config.catalog.path);
        Catalog::load(&source)
            .with_context(|| format!("Failed to load catalog {}", self.config.catalog.path))
    }

    fn load_patterns(&self) -> Result<PatternLibrary> {
        match self.config.catalog.patterns_path() {
            Some(path) => PatternLibrary::from_file(&path)
                .with_context(|| format!("Failed to load pattern library {:?}", path)),
            None => PatternLibrary::builtin().context("Built-in pattern library is invalid"),
        }
    }

    async fn open_store(&self) -> Result<Arc<dyn DocumentStore>> {
        let database = &self.config.directory.database;
        let store = if database == ":memory:" {
            SqliteStore::in_memory().await?
        } else {
            SqliteStore::new(database)
                .await
                .with_context(|| format!("Failed to open database {}", database))?
        };
        Ok(Arc::new(store))
    }

    fn page_size(&self, page: &PageArgs) -> usize {
        page.limit.unwrap_or(self.config.directory.page_size)
    }

    fn routes(&self, json: bool) -> Result<ExitCode> {
        let catalog = self.load_catalog()?;
        let patterns = self.load_patterns()?;
        let routes = screenvault_routes::enumerate(&catalog, &patterns);

        if json {
            println!("{}", serde_json::to_string_pretty(&routes)?);
        } else {
            for route in &routes {
                println!("{}", route);
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    fn patterns(&self, section: Option<&str>, slug: Option<&str>, json: bool) -> Result<ExitCode> {
        let catalog = self.load_catalog()?;
        let library = self.load_patterns()?;
        let screens = catalog.enriched_screens();

        if let Some(slug) = slug {
            let pattern = library
                .get(slug)
                .with_context(|| format!("No pattern named '{}'", slug))?;
            let matched = screenvault_patterns::match_pattern(pattern, &screens);
            if json {
                println!("{}", serde_json::to_string_pretty(&matched)?);
            } else {
                println!(
                    "{} ({} screens, {} apps)",
                    pattern.definition().name,
                    matched.screens.len(),
                    matched.app_count
                );
                for screen in &matched.screens {
                    println!(
                        "  {} / {} #{} {}",
                        screen.app_name, screen.screen.flow, screen.screen.step, screen.screen.label
                    );
                }
            }
            return Ok(ExitCode::SUCCESS);
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Summary<'a> {
            slug: &'a str,
            section: &'a str,
            screens: usize,
            app_count: usize,
        }

        let summaries: Vec<Summary> = library
            .match_all(&screens)
            .into_iter()
            .filter(|(p, _)| {
                section.map_or(true, |s| p.definition().category.eq_ignore_ascii_case(s))
            })
            .map(|(p, m)| Summary {
                slug: p.slug(),
                section: &p.definition().category,
                screens: m.screens.len(),
                app_count: m.app_count,
            })
            .collect();

        if json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        } else {
            for s in &summaries {
                println!(
                    "{:<28} {:<14} {:>4} screens {:>3} apps",
                    s.slug, s.section, s.screens, s.app_count
                );
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    fn package(&self, args: PackageArgs) -> Result<ExitCode> {
        let packager_config = &self.config.packager;
        let limits = packager_config.limits();
        let output = args
            .output
            .unwrap_or_else(|| PathBuf::from(&packager_config.output_dir));

        if args.validate {
            let report = validate(&output, &limits)?;
            match Skill::metadata_from_dir(&output) {
                Ok(skill) => println!("Bundle {}: {}", skill.name(), skill.description()),
                Err(e) => warn!("Bundle metadata unreadable: {:#}", e),
            }
            for issue in &report.issues {
                println!("{}", issue);
            }
            println!(
                "Checked {} files: {} issues",
                report.files_checked,
                report.issues.len()
            );
            return Ok(if report.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }

        let input = args
            .input
            .unwrap_or_else(|| PathBuf::from(&packager_config.intelligence_dir));
        let report = Packager::new(input, &output).with_limits(limits).generate()?;

        for file in &report.files {
            println!("{:>5}  {}", file.lines, file.path.display());
        }
        println!(
            "Wrote {} files ({} lines) to {}",
            report.files.len(),
            report.total_lines(),
            output.display()
        );
        Ok(ExitCode::SUCCESS)
    }

    async fn waitlist(&self, action: WaitlistAction) -> Result<ExitCode> {
        let waitlist = Waitlist::new(self.open_store().await?);
        match action {
            WaitlistAction::Add { email, source } => {
                match waitlist.signup(&email, source.as_deref()).await? {
                    SignupOutcome::Joined => println!("Added {} to the waitlist", email.trim()),
                    SignupOutcome::AlreadyJoined => {
                        println!("{} is already on the waitlist", email.trim())
                    }
                }
            }
            WaitlistAction::Count => println!("{}", waitlist.count().await?),
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn agents(&self, action: AgentsAction) -> Result<ExitCode> {
        let store = self.open_store().await?;
        let AgentsAction::List {
            verified,
            skill,
            page,
        } = action;

        let directory =
            AgentDirectory::new(store.clone()).with_page_size(self.page_size(&page));
        let filter = AgentFilter {
            verified_only: verified,
            skill,
        };
        let cursor =
            resume(store.as_ref(), &directory.query(&filter), page.after.as_deref()).await?;
        let listing = directory.list(&filter, cursor).await?;

        print_listing(&listing, page.json, |agent| {
            format!(
                "{:<24} {:>4.1} {:>5} tasks {}{}",
                agent.name,
                agent.reputation,
                agent.tasks_completed,
                agent.status,
                if agent.verified { " (verified)" } else { "" }
            )
        })?;
        Ok(ExitCode::SUCCESS)
    }

    async fn bounties(&self, action: BountiesAction) -> Result<ExitCode> {
        let store = self.open_store().await?;
        match action {
            BountiesAction::List { status, sort, page } => {
                let sort: BountySort = sort.parse().map_err(anyhow::Error::msg)?;
                let board =
                    BountyBoard::new(store.clone()).with_page_size(self.page_size(&page));
                let query = board.query(status.as_deref(), sort);
                let cursor = resume(store.as_ref(), &query, page.after.as_deref()).await?;
                let listing = board.list(status.as_deref(), sort, cursor).await?;

                print_listing(&listing, page.json, |bounty| {
                    format!(
                        "{:<12} {:<32} {:>10.2} {} {}",
                        bounty.id, bounty.title, bounty.reward, bounty.currency, bounty.status
                    )
                })?;
            }
            BountiesAction::Claims { bounty_id, json } => {
                let claims = BountyBoard::new(store).claims(&bounty_id).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&claims)?);
                } else {
                    for claim in &claims {
                        println!("{:<24} {}", claim.agent_name, claim.status);
                    }
                }
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn dashboard(&self, table: Option<Table>, page: PageArgs) -> Result<ExitCode> {
        let store = self.open_store().await?;
        let dashboard = AdminDashboard::new(store.clone()).with_page_size(self.page_size(&page));

        let Some(table) = table else {
            let stats = dashboard.stats().await;
            if page.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Agents       {}", stats.agents);
                println!("Bounties     {}", stats.bounties);
                println!("Escrows      {}", stats.escrows);
                println!("Deposits     {}", stats.deposits);
                println!("Withdrawals  {}", stats.withdrawals);
                println!("Waitlist     {}", stats.waitlist);
            }
            return Ok(ExitCode::SUCCESS);
        };

        let collection = match table {
            Table::Escrows => screenvault_directory::ESCROWS,
            Table::Deposits => screenvault_directory::DEPOSITS,
            Table::Withdrawals => screenvault_directory::WITHDRAWALS,
        };
        let query = dashboard.table_query(collection);
        let cursor = resume(store.as_ref(), &query, page.after.as_deref()).await?;

        match table {
            Table::Escrows => print_listing(&dashboard.escrows(cursor).await?, page.json, |e| {
                format!("{:<16} {:>12.2} {} {}", e.id, e.amount, e.currency, e.status)
            })?,
            Table::Deposits => print_listing(&dashboard.deposits(cursor).await?, page.json, |d| {
                format!("{:<16} {:>12.2} {} {}", d.id, d.amount, d.currency, d.status)
            })?,
            Table::Withdrawals => {
                print_listing(&dashboard.withdrawals(cursor).await?, page.json, |w| {
                    format!("{:<16} {:>12.2} {} {}", w.id, w.amount, w.currency, w.status)
                })?
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn import(&self, collection: &str, file: PathBuf) -> Result<ExitCode> {
        let content =
            fs::read_to_string(&file).with_context(|| format!("Failed to read {:?}", file))?;
        let values: Vec<serde_json::Value> = serde_json::from_str(&content)
            .with_context(|| format!("{:?} must contain a JSON array", file))?;

        let store = self.open_store().await?;
        let written = import(store.as_ref(), collection, values).await?;
        println!("Imported {} documents into {}", written, collection);
        Ok(ExitCode::SUCCESS)
    }
}

fn classify_rate(rate: f64, label: &str) -> Result<ExitCode> {
    let labeled: Classification = label.parse().map_err(anyhow::Error::msg)?;
    if !(0.0..=1.0).contains(&rate) {
        warn!("Adoption rate {} is outside 0.0..=1.0", rate);
    }
    println!("{}", classify(rate, labeled));
    Ok(ExitCode::SUCCESS)
}

/// Cursor for `--after <id>`; a vanished document restarts from the top
async fn resume(
    store: &dyn DocumentStore,
    query: &Query,
    after: Option<&str>,
) -> Result<Option<Cursor>> {
    let Some(id) = after else {
        return Ok(None);
    };
    let cursor = cursor_after(store, query, id).await?;
    if cursor.is_none() {
        warn!(
            "Document '{}' not found in {}; starting from the first page",
            id, query.collection
        );
    }
    Ok(cursor)
}

fn print_listing<T: Serialize>(
    listing: &Listing<T>,
    json: bool,
    line: impl Fn(&T) -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(listing)?);
        return Ok(());
    }

    for item in &listing.items {
        println!("{}", line(item));
    }
    if listing.has_more {
        info!("More results available; pass --after with the last id");
        println!("(more)");
    }
    Ok(())
}
