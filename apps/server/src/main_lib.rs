use std::sync::Arc;

use crate::{config::Config, domain_events::WebDomainEventSink, events::EventBus};
use pledgewall_core::{
    events::DomainEventSink,
    live::{spawn_pledge_wall_feed, spawn_stats_feed, FeedConfig, FeedHandle},
    PledgeCatalog, PledgeService, PledgeServiceTrait, PledgeStats, PublicPledge,
};
use pledgewall_storage_rest::{PledgeRepository, RemoteStore, RestClient};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub pledge_service: Arc<dyn PledgeServiceTrait>,
    pub stats_feed: Arc<FeedHandle<PledgeStats>>,
    pub wall_feed: Arc<FeedHandle<Vec<PublicPledge>>>,
    pub catalog: PledgeCatalog,
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires the live feeds around `pledge_service`. Must be called inside a
    /// tokio runtime because the feeds start polling immediately.
    pub fn new(
        pledge_service: Arc<dyn PledgeServiceTrait>,
        event_bus: EventBus,
        config: &Config,
    ) -> Self {
        let stats_feed = spawn_stats_feed(
            pledge_service.clone(),
            FeedConfig::stats().with_period(config.stats_poll_period),
        );
        let wall_feed = spawn_pledge_wall_feed(
            pledge_service.clone(),
            config.wall_limit,
            FeedConfig::pledge_wall().with_period(config.wall_poll_period),
        );

        Self {
            pledge_service,
            stats_feed: Arc::new(stats_feed),
            wall_feed: Arc::new(wall_feed),
            catalog: PledgeCatalog::default(),
            event_bus,
        }
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("PLEDGE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = RestClient::new(&config.store_url, &config.store_anon_key)?;
    tracing::info!("Pledge store: {}", client.table_url(pledgewall_core::constants::PLEDGES_TABLE));
    let store: Arc<dyn RemoteStore> = Arc::new(client);

    let event_bus = EventBus::new(256);
    let domain_event_sink: Arc<dyn DomainEventSink> =
        Arc::new(WebDomainEventSink::new(event_bus.clone()));

    let pledge_repository = Arc::new(PledgeRepository::new(store));
    let pledge_service: Arc<dyn PledgeServiceTrait> =
        Arc::new(PledgeService::new(pledge_repository, domain_event_sink));

    Ok(Arc::new(AppState::new(pledge_service, event_bus, config)))
}
