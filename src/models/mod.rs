// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: the UI tree, rule table, and attachment metadata shared by logic and views.

pub mod attachment;
pub mod document;
pub mod registration;
pub mod rules;
