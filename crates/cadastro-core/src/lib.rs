//! Cadastro Core Library
//!
//! Registration and appointment management for a rental fleet (T_VEICULOS)
//! and a clinic patient base (T_PACIENTE), backed by a local SQL store.
//!
//! # Architecture
//!
//! ```text
//! Console input → validated forms → typed commands
//!                                        │
//!                        ┌───────────────▼───────────────┐
//!                        │        Query builder          │
//!                        │  identifiers: catalog enums   │
//!                        │  values: bind parameters      │
//!                        └───────────────┬───────────────┘
//!                                        │
//!                ┌───────────────────────┼───────────────────────┐
//!                │                       │                       │
//!                ▼                       ▼                       ▼
//!          ASCII tables            xlsx/csv/json            ViaCEP lookup
//!          (terminal)                 export               (address fill)
//! ```
//!
//! # Core Principle
//!
//! **SQL identifiers are never built from user text.** Table and column names
//! come only from the closed [`catalog`] enums; every user-supplied value is
//! bound as a parameter.
//!
//! # Modules
//!
//! - [`catalog`]: Typed table/column vocabulary with search and update allow-lists
//! - [`models`]: Domain types (Vehicle, Patient and their closed-choice enums)
//! - [`db`]: Database layer (schema, CRUD per entity)
//! - [`query`]: Projections, search filters, and the generic fetch path
//! - [`render`]: ASCII table and vertical record rendering
//! - [`export`]: xlsx, csv (semicolon) and json file export
//! - [`cep`]: ViaCEP address lookup with retries

pub mod catalog;
pub mod cep;
pub mod db;
pub mod export;
pub mod models;
pub mod query;
pub mod render;

// Re-export commonly used types
pub use catalog::{Catalog, PatientColumn, VehicleColumn};
pub use cep::{Address, AddressLookup, CepError, ViaCep};
pub use db::{Database, DbError, DbResult};
pub use export::{export_records, ExportError, ExportFormat};
pub use models::{Patient, Vehicle};
pub use query::{fetch, NumericOp, Projection, QueryError, Record, SearchFilter, SqlValue};
pub use render::{render_table, render_vertical};
