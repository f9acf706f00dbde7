//! Stripe Forms - browser forms for Stripe subscriptions and charges
//!
//! Takes form submissions from server-rendered pages, forwards them to the
//! Stripe API, and answers each with a uniform `{ ok, message }` body.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
