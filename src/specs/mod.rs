// src/specs/mod.rs
//! # Source "specs" module
//!
//! This module hosts the **source-specific reading specifications**: one per
//! upstream format. Each spec encodes *where the ground truth lives* in the
//! payload and *how to extract it robustly* into typed records.
//!
//! ## What lives here
//! - **Pure parsing** of already-fetched payloads: the e-Stat JSON envelope
//!   (`estat`) and the weight workbook's cell grid (`weights`).
//! - **Layout knowledge**: column positions, reserved period codes, the
//!   root item's irregular encoding.
//! - **Fail-fast validation**: an unexpected layout is a schema error, never
//!   a silently shifted column.
//!
//! ## What does **not** live here
//! - **Networking, chunking, sorting** – see `fetch`.
//! - **Hierarchy navigation or weight reconciliation** – see `navigator`.
//!
//! ## Typical call chain
//! ```text
//! Session::load → fetch::collect_cpi    → specs::estat::parse_response   (per chunk)
//!               → fetch::collect_weights → specs::weights::parse_sheet
//! ```
//!
//! ## Testing notes
//! Specs are testable **offline** against small captured or synthetic
//! payloads; see the unit tests in each file.
pub mod estat;
pub mod weights;
