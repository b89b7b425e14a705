//! Product catalog client library.
//!
//! The `domain` module holds the list and form logic, `outbound` talks to the
//! REST backend, and `inbound` carries the console front end.

pub mod domain;
pub mod inbound;
pub mod outbound;
