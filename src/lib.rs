//! Storage core of a community-organizing CRM: participants, institutions,
//! events (actions), tags and phone numbers, with archive-instead-of-delete
//! semantics and explicit per-type serialization.

pub mod cli;
pub mod config;
pub mod db;
pub mod phone;
