//! Typed service façades over the authenticated transport.
//!
//! Each operation is a pure composition: build a path, pick a method,
//! delegate to the shared [`crate::client::Client`], and decode. Card-fetching
//! operations additionally route the raw payload through the card/pass
//! resolver, since their response shape depends on account configuration.

mod cards;
mod console;

pub use cards::AccessCards;
pub use console::Console;
