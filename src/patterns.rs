//! Compiled regex patterns shared by the extraction passes.
//!
//! All patterns are compiled once on first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Any run of whitespace, including non-breaking space.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\u{00A0}]+").expect("WHITESPACE_RUN regex"));

/// Link targets kept by the links pass: anything starting with `http`.
pub static ABSOLUTE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^http").expect("ABSOLUTE_HREF regex"));
