//! # Event Bus Module
//!
//! Publish/subscribe distribution of application events between the
//! designer state, the data refresh loop and the print pipeline.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docket_core::event_bus::{event_bus, AppEvent, DataEvent, EventCategory};
//!
//! let subscription = event_bus().subscribe(&[EventCategory::Data], |event| {
//!     if let AppEvent::Data(data) = event {
//!         tracing::info!("data event: {:?}", data);
//!     }
//! });
//!
//! event_bus().publish(AppEvent::Data(DataEvent::Cleared));
//! event_bus().unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
