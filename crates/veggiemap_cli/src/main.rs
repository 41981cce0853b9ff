//! Terminal front end for veggiemap.
//!
//! # Responsibility
//! - Map command-line flags onto filter controls and the add form.
//! - Drive refresh/submit and print list and map views.

mod render;

use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use rusqlite::Connection;
use std::path::PathBuf;
use std::process::ExitCode;
use veggiemap_core::db::{open_db, open_db_in_memory};
use veggiemap_core::{
    default_log_level, init_logging, Action, AppState, ClientConfig, Cuisine, CuisineFilter,
    Endpoints, HttpRestaurantApi, Location, PriceFilter, PriceRange, Rating, RestaurantDraft,
    RetrievalService, SortKey, SqliteSnapshotStore, SubmissionService, ViewMode, CUISINE_ALL,
    PRICE_ALL,
};

#[derive(Debug, Parser)]
#[command(name = "veggiemap", version, about = "Browse and share vegan-friendly restaurants")]
struct Cli {
    /// API base URL, e.g. https://example.org/api
    #[arg(long, global = true, env = "VEGGIEMAP_API_URL")]
    api_url: Option<String>,

    /// SQLite file holding the offline copy of the collection.
    #[arg(long, global = true, env = "VEGGIEMAP_CACHE_PATH")]
    cache: Option<PathBuf>,

    /// Keep the offline copy in memory only.
    #[arg(long, global = true)]
    no_cache: bool,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true, env = "VEGGIEMAP_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true, env = "VEGGIEMAP_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Refresh and show restaurants.
    List(ViewArgs),
    /// Submit a new recommendation, then show the refreshed list.
    Add {
        #[command(flatten)]
        draft: DraftArgs,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Debug, Args)]
struct ViewArgs {
    #[arg(long, default_value = "")]
    search: String,
    /// `All` or a cuisine name.
    #[arg(long, default_value = CUISINE_ALL)]
    cuisine: String,
    /// `all` or one of €, €€, €€€, €€€€.
    #[arg(long, default_value = PRICE_ALL)]
    price: String,
    /// newest | oldest | rating | price-asc | price-desc
    #[arg(long, default_value = "newest")]
    sort: String,
    #[arg(long, default_value = "both")]
    view: ViewMode,
    /// Highlight one restaurant by id.
    #[arg(long)]
    select: Option<String>,
}

#[derive(Debug, Args)]
struct DraftArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long = "kind", value_name = "CUISINE")]
    kind: Cuisine,
    #[arg(long = "tier", value_name = "PRICE")]
    tier: PriceRange,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    rating: u8,
    #[arg(long, default_value = "")]
    recommended_by: String,
    #[arg(long, allow_negative_numbers = true)]
    latitude: f64,
    #[arg(long, allow_negative_numbers = true)]
    longitude: f64,
    #[arg(long, default_value = "")]
    address: String,
}

impl DraftArgs {
    fn into_draft(self) -> Result<RestaurantDraft, String> {
        let rating = Rating::new(self.rating).map_err(|err| err.to_string())?;
        Ok(RestaurantDraft {
            name: self.name,
            description: self.description,
            cuisine: self.kind,
            price_range: self.tier,
            rating,
            recommended_by: self.recommended_by,
            location: Location {
                latitude: self.latitude,
                longitude: self.longitude,
                address: self.address,
            },
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Some(log_dir) = config.log_dir.as_ref().and_then(|dir| dir.to_str()) {
        let level = config.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_cache(&cli, &config) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open cache: {err}");
            return ExitCode::FAILURE;
        }
    };

    let retrieval = RetrievalService::new(
        HttpRestaurantApi::new(),
        SqliteSnapshotStore::new(&conn),
        config.endpoints.clone(),
    );
    let mut state = AppState::new();

    let (view, draft) = match cli.command {
        Command::List(view) => (view, None),
        Command::Add { draft, view } => (view, Some(draft)),
    };

    retrieval.refresh(&mut state).await;

    let mut status = ExitCode::SUCCESS;
    if let Some(draft) = draft {
        let submission = SubmissionService::new(&retrieval);
        let result = match draft.into_draft() {
            Ok(draft) => submission.submit(draft, &mut state).await.map(|receipt| {
                info!(
                    "event=cli_add module=cli status=ok restaurant_id={}",
                    receipt.restaurant.id
                );
                println!("added {}", receipt.restaurant.id);
            }),
            Err(message) => {
                state.dispatch(Action::Failed(message));
                Ok(())
            }
        };
        if result.is_err() || state.error().is_some() {
            status = ExitCode::FAILURE;
        }
    }

    apply_view(&mut state, view);
    print!("{}", render::render(&state));
    status
}

fn resolve_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url.as_ref().filter(|url| !url.trim().is_empty()) {
        config.endpoints = Endpoints::new(Some(api_url.trim().to_string()));
    }
    if let Some(cache) = &cli.cache {
        config.cache_path = cache.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = Some(level.clone());
    }
    config
}

fn open_cache(cli: &Cli, config: &ClientConfig) -> Result<Connection, veggiemap_core::db::DbError> {
    if cli.no_cache {
        return open_db_in_memory();
    }
    open_db(&config.cache_path).or_else(|err| {
        warn!(
            "event=cli_cache module=cli status=error error_code=cache_unavailable path={} error={}",
            config.cache_path.display(),
            err
        );
        eprintln!("cache unavailable ({err}); continuing without offline copy");
        open_db_in_memory()
    })
}

fn apply_view(state: &mut AppState, view: ViewArgs) {
    state.dispatch(Action::SetSearchTerm(view.search));
    state.dispatch(Action::SetCuisineFilter(CuisineFilter::parse(&view.cuisine)));
    state.dispatch(Action::SetPriceFilter(PriceFilter::parse(&view.price)));
    state.dispatch(Action::SetSortKey(SortKey::parse(&view.sort)));
    state.dispatch(Action::SetViewMode(view.view));
    state.dispatch(Action::Select(view.select));
}
