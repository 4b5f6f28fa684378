//! Request-scoped batching and caching for the kontrakt GraphQL server.
//!
//! Field resolvers ask a [DataLoader](core::data_loader::DataLoader) for
//! single keys; keys asked for within a short window are fetched from the
//! database with one query and cached for the rest of the request.

pub mod core;
