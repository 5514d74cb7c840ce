//! # Folio
//!
//! A small personal-portfolio web server and static site exporter. A zip
//! archive supplies project records and images; the same rendered site can be
//! served over HTTP or written to disk as plain static files.
//!
//! # Architecture: Content Pipeline
//!
//! Content moves through a single pipeline with two possible ends:
//!
//! ```text
//! input.zip ──extract──▶ extracted/ + static/img/
//! extracted/projects.json ──populate──▶ database ──load──▶ registry
//!            (or: content directory of markdown ──load──▶ registry)
//! registry ──render──▶ { HTTP responses | out/ static export }
//! ```
//!
//! The registry in the middle is the consistency point: it is built once from
//! a full load, validated (unique, path-safe titles), and swapped in as an
//! immutable snapshot. Everything downstream — request handlers and the
//! exporter — reads snapshots, so a reload can never be observed half-done.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`archive`] | Unpacks the input zip into content and image directories |
//! | [`store`] | Record sources: SurrealDB-backed and directory-backed |
//! | [`project`] | The shared record type and the title/slug invariant |
//! | [`registry`] | Immutable in-memory snapshot with atomic reload |
//! | [`render`] | Maud templates behind a typed render-context union |
//! | [`export`] | Staged static export: pages plus mirrored asset tree |
//! | [`server`] | axum router: index, project pages, static files |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than a runtime engine loading template files:
//!
//! - **Compile-time checking**: malformed HTML is a build error.
//! - **Typed data**: pages are built from a [`render::RenderContext`] — the
//!   renderer cannot be handed the wrong shape of data.
//! - **XSS-safe by default**: interpolation is auto-escaped (the one
//!   deliberate exception, pre-rendered descriptions, is documented).
//! - **Zero runtime files**: no template directory to configure or desync.
//!
//! ## Startup Is Fatal, Requests Are Not
//!
//! Every I/O failure before the server starts listening — missing archive,
//! unreachable database, malformed record file, invalid title — aborts the
//! process with a diagnostic. A misconfigured deployment should refuse to
//! run, not silently serve empty content. After startup the policy flips:
//! a missing project is a rendered 404 and a logged warning, never a crash.
//!
//! ## Destructive Bulk Load
//!
//! The archive's record file is the source of truth. Populating the database
//! drops and recreates it wholesale; there is no merge, no migration, no
//! partial-failure recovery. Simple and predictable beats clever here.

pub mod archive;
pub mod export;
pub mod project;
pub mod registry;
pub mod render;
pub mod server;
pub mod store;
