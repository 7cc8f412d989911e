// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   bytes_to_utf8()  CP1252/IBM866/UTF-16 --> UTF-8
//!   decode_input()   same, with a leading BOM removed
//! ```

pub mod encoding;
