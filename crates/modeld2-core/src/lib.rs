//! modeld2 Core Types and Definitions
//!
//! This crate provides the foundational types shared by the modeld2 crates:
//!
//! - **Labels**: Entity labels and raw reference resolution ([`label::EntityLabel`])
//! - **Registry**: The read-only snapshot of declared apps and entities ([`registry`] module)
//! - **Fields**: Field declarations and kind classification ([`field`] module)
//! - **Origin**: Deciding whether an app is locally authored ([`origin::OriginPredicate`])

pub mod field;
pub mod label;
pub mod origin;
pub mod registry;
