//! Server-Sent Event streams.
//!
//! `/live/stats` and `/live/wall` replay the current feed view on connect and
//! then every change, including highlight clears. `/events/stream` relays the
//! event bus.

use std::{convert::Infallible, sync::Arc, time::Duration};

use crate::main_lib::AppState;
use axum::{
    extract::State,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_core::stream::Stream;
use pledgewall_core::live::FeedView;
use serde::Serialize;
use tokio::sync::watch;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream, WatchStream};

fn keep_alive() -> KeepAlive {
    KeepAlive::new()
        .interval(Duration::from_secs(15))
        .text("keep-alive")
}

fn feed_stream<T>(
    name: &'static str,
    receiver: watch::Receiver<FeedView<T>>,
) -> impl Stream<Item = Result<SseEvent, Infallible>>
where
    T: Clone + Serialize + Send + Sync + 'static,
{
    tokio_stream::StreamExt::filter_map(WatchStream::new(receiver), move |view| {
        match SseEvent::default().event(name).json_data(&view) {
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                tracing::error!("Failed to serialize {} view: {}", name, err);
                None
            }
        }
    })
}

async fn stream_stats(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    Sse::new(feed_stream("stats", state.stats_feed.subscribe())).keep_alive(keep_alive())
}

async fn stream_wall(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    Sse::new(feed_stream("wall", state.wall_feed.subscribe())).keep_alive(keep_alive())
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let receiver = BroadcastStream::new(state.event_bus.subscribe());
    let stream = tokio_stream::StreamExt::filter_map(receiver, |event| match event {
        Ok(evt) => {
            let sse_event = SseEvent::default().event(evt.name);
            let sse_event = if let Some(payload) = evt.payload {
                match sse_event.json_data(payload) {
                    Ok(ev) => ev,
                    Err(err) => {
                        tracing::error!(
                            "Failed to serialize SSE payload for {}: {}",
                            evt.name,
                            err
                        );
                        return None;
                    }
                }
            } else {
                sse_event.data("null")
            };
            Some(Ok(sse_event))
        }
        Err(BroadcastStreamRecvError::Lagged(_)) => None,
    });

    Sse::new(stream).keep_alive(keep_alive())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/live/stats", get(stream_stats))
        .route("/live/wall", get(stream_wall))
        .route("/events/stream", get(stream_events))
}
