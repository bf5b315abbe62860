// src/ingest/providers/mod.rs
pub mod feed_xml;
pub mod fixture;
pub mod http;
