#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logchan-sink/src/lib.rs
//!
//! # Overview
//!
//! `logchan-sink` provides the output side of the logchan workspace. The
//! level gate in the `logchan` crate decides *whether* a line is emitted and
//! which channel prefix it carries; the sinks in this crate decide *where*
//! the finished line goes.
//!
//! # Design
//!
//! Every sink implements [`LineSink`], a single-method trait taking `&self`
//! so one sink can be shared across threads behind an
//! [`Arc`](std::sync::Arc). Three implementations ship with the crate:
//!
//! - [`WriterSink`] wraps any [`std::io::Write`] behind a mutex and honours
//!   a [`LineMode`];
//! - [`StderrSink`] writes to the process's standard error;
//! - [`CaptureSink`] records lines in memory for tests and deferred output.
//!
//! # Invariants
//!
//! - A line handed to a sink is written in one piece; concurrent lines never
//!   interleave inside a [`WriterSink`].
//! - [`LineMode::WithNewline`] never produces a blank line: payloads that
//!   already end in `'\n'` are not terminated twice.
//!
//! # Errors
//!
//! [`LineSink::write_line`] does not report failures. [`WriterSink`] exposes
//! [`WriterSink::try_write_line`] for callers that need the underlying
//! [`std::io::Error`].
//!
//! # Examples
//!
//! ```
//! use logchan_sink::{CaptureSink, LineSink};
//!
//! let sink = CaptureSink::new();
//! sink.write_line("[info] ready");
//! assert_eq!(sink.drain(), vec!["[info] ready".to_string()]);
//! ```

mod line_mode;
mod sink;

pub use line_mode::LineMode;
pub use sink::{CaptureSink, LineSink, StderrSink, WriterSink};
