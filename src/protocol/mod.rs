//! Operator-facing line protocol.
//!
//! This module defines the text protocol spoken between a numeric-computing
//! host (MATLAB, Python) and the bridge: command parsing, the dispatch
//! loop, the measurement sequence, and response formatting.
//!
//! # Overview
//!
//! The protocol is deliberately minimal. The host writes one command per
//! line to the bridge's stdin; the bridge answers with at most one
//! comma-delimited line on stdout, flushed immediately. The first response
//! field is exactly `SUCCESS` or `ERROR`; numeric fields are always
//! dot-decimal with no grouping separators, so output parses identically
//! under any host locale.
//!
//! There is exactly one client, one instrument session, and one command in
//! flight at a time; the only blocking phase is the measurement poll loop.
//!
//! # Key Components
//!
//! - [`Command`]: a parsed input line (normalized keyword + raw argument).
//! - [`CommandServer`]: the read/dispatch/respond loop and its handlers.
//! - [`Response`]: a single-line outcome, success or error.
//! - [`PollConfig`]: pacing and bound for the measurement poll loop.
//!
//! # See Also
//!
//! - [`device`](crate::device): the capability set the handlers call into.
//! - [`client`](crate::client): the host-side end of this protocol.
mod command;
mod measure;
mod response;
mod server;

pub use command::{Command, CommandError};
pub use measure::{MeasureError, PollConfig};
pub use response::{Response, ResponseError};
pub use server::{CommandServer, ServerConfig};
