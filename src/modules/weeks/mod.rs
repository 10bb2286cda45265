//! Weeks module: the raw `weeks` collection and its normalized index.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
