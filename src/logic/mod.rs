// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Validation-and-feedback engine operating on the registration page tree.

pub mod age;
pub mod display;
pub mod gate;
pub mod password;
pub mod reset;
pub mod upload;
pub mod validator;
