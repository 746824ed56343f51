#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every `HeroHub` crate: error enums, feature slices,
//! API data models and documented Axum handlers.
//!
//! Examples are `ignore`d because proc-macro crates cannot use their own output;
//! the workspace crates are the real usage reference.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a request/response model with a consistent Serde and `OpenAPI` policy.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consuming crate enables `server`.
/// * **Serde Policy**:
///     * `rename_all = "snake_case"` unless overridden (the public wire format).
///     * `deny_unknown_fields` unless disabled.
///
/// # Example
///
/// ```rust,ignore
/// use hhub_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct PowerPatch {
///     pub description: Option<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Bridges an Axum handler with `utoipa` path documentation.
///
/// Accepts the usual `utoipa::path` arguments (`get`, `path = "..."`,
/// `responses(...)`, `tag = ...`). The documentation attribute is only emitted
/// when the consuming crate enables `server`.
///
/// # Example
///
/// ```rust,ignore
/// use hhub_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/heroes",
///     responses((status = OK, body = [HeroSummary])),
///     tag = HEROES_TAG
/// )]
/// pub async fn list_heroes(State(state): State<ApiState>) -> Result<Json<Vec<HeroSummary>>, ApiError> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a crate error enum.
///
/// # Features
///
/// * Injects `#[derive(Debug, thiserror::Error)]`.
/// * Generates a companion `<Name>Ext` trait adding `.context(...)` to results.
/// * Implements `From<T>` for variants holding a `source` (or `#[source]`/`#[from]`) field.
/// * Implements `From<&'static str>` and `From<String>` when an `Internal` variant exists.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. Variants wrapping a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use hhub_derive::hhub_error;
/// use std::borrow::Cow;
///
/// #[hhub_error]
/// pub enum DatabaseError {
///     #[error("SQL error{}: {source}", format_context(.context))]
///     Sqlx {
///         #[source]
///         source: sqlx::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal database error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// async fn count(pool: &SqlitePool) -> Result<i64, DatabaseError> {
///     sqlx::query_scalar("SELECT COUNT(*) FROM heroes")
///         .fetch_one(pool)
///         .await
///         .context("Counting heroes")
/// }
/// ```
#[proc_macro_attribute]
pub fn hhub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Turns a struct into a registrable feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`,
/// derefs to it and implements `FeatureSlice` for the kernel registry.
///
/// # Example
/// ```rust,ignore
/// #[hhub_derive::hhub_slice]
/// pub struct Heroes {
///     pub repository: HeroRepository,
/// }
///
/// let slice = Heroes::new(HeroesInner { repository });
/// ```
#[proc_macro_attribute]
pub fn hhub_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
