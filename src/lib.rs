// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          transform / map / env
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML schema definitions  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             pattern     mapping     env
//!           regex+render  JSON maps  proxies
//!                 |           |        |
//!                 +-----------+--------+
//!                             v
//!   +-----------------------------------------+
//!   |  schema   descriptor, types, coercion   |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod schema;
pub mod utility;
