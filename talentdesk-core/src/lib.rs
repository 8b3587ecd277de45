#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unreachable_pub)]

//! talentdesk-core

pub mod application;
pub mod company;
pub mod decode;
pub mod filter;
pub mod internship;
pub mod responses;
pub mod stats;
pub mod user;
