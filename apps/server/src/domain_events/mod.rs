//! Domain event handling for the web server.
//!
//! Core services emit [`DomainEvent`](pledgewall_core::events::DomainEvent)s
//! through [`WebDomainEventSink`]; a background worker turns them into
//! [`ServerEvent`](crate::events::ServerEvent)s on the event bus.

mod sink;

pub use sink::WebDomainEventSink;
