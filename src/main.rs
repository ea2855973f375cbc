//! `pco-embed` - print `Planning Center` listings as HTML fragments.

use clap::Parser;

use pco_embed::cache::{CacheStore, FileStore, MemoryStore};
use pco_embed::cli::Args;
use pco_embed::config::Config;
use pco_embed::error::Result;
use pco_embed::logging::init_logging;
use pco_embed::planning_center::PlanningCenterClient;
use pco_embed::types::{ContentType, ListingRequest};
use pco_embed::ListingService;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::load()?;
    if !config.has_planning_center_credentials() {
        tracing::warn!("PCO_APP_ID or PCO_SECRET is not set; only cached listings can be shown");
    }

    let store: Box<dyn CacheStore> = match (&config.cache_dir, args.no_cache) {
        (Some(dir), false) => Box::new(FileStore::new(dir)),
        _ => Box::new(MemoryStore::new()),
    };
    let service = ListingService::from_config(PlanningCenterClient::new(&config), store, &config);

    let requests: Vec<ListingRequest> = if args.wants_all() {
        ContentType::all()
            .iter()
            .map(|t| ListingRequest::for_type(*t, args.limit()))
            .collect()
    } else {
        vec![args.request()]
    };

    if args.refresh {
        for request in &requests {
            if let Err(e) = service.invalidate(request) {
                tracing::warn!("Failed to clear cached {} listing: {}", request.keyword, e);
            }
        }
    }

    if args.wants_all() {
        for (content_type, html) in service.render_all(args.limit()).await {
            println!("<!-- {content_type} -->");
            println!("{html}");
        }
    } else {
        for request in &requests {
            println!("{}", service.render(request).await);
        }
    }

    Ok(())
}
