#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared across the workspace.
//!
//! ## Usage
//! Every crate that declares an error enum depends on this crate and on `thiserror`:
//! ```toml
//! [dependencies]
//! fhub-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for the error enums of the workspace crates.
///
/// The annotated enum becomes a `thiserror::Error` with uniform context handling.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>`, and for
///   `Result<T, SourceError>` of every variant that wraps a source error.
/// * `From<SourceError>` for variants with a `source` field (or a field marked
///   `#[source]` / `#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
/// * A private `format_context` helper for the `#[error(...)]` format strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. A variant wrapping a source error must carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use fhub_derive::fhub_error;
/// use std::borrow::Cow;
///
/// #[fhub_error]
/// pub enum CatalogueError {
///     #[error("JSON error{}: {source}", format_context(.context))]
///     Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(src: &str) -> Result<Table, CatalogueError> {
///     serde_json::from_str(src).context("Parsing feature table")
/// }
/// ```
#[proc_macro_attribute]
pub fn fhub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
