//! Grammar validator for the Easel layout dialect.
//!
//! This crate implements the structural grammar of layout documents as a
//! push-down automaton over a stream of XML parse events. The
//! [`Validator`](validator::Validator) interprets each event against the
//! current grammar context, accumulates diagnostics, and forwards the
//! event unchanged to an owned [`EventSink`](easel_core::event::EventSink),
//! so a serializer downstream sees exactly the stream that was validated.
//!
//! The [`reader`] module adapts the underlying XML tokenizer into the
//! located event stream the validator consumes; malformed markup is a
//! fatal error that aborts the pass, while schema violations accumulate
//! so one run surfaces as many findings as possible.

pub mod error;
pub mod reader;
pub mod registry;
pub mod scope;
pub mod validator;

#[cfg(test)]
mod validator_tests;

pub use validator::Validator;
