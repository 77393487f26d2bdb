// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! egui views over the registration tree, emitting MVU messages.

pub mod date_input;
pub mod file_upload;
pub mod form;
pub mod password;
