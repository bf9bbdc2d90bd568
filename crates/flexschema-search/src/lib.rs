//! # flexschema-search
//!
//! Search view definitions and migration planning.
//!
//! Every root entity with flex search enabled needs one view over its
//! collection. This crate derives those views from a
//! [`Model`](flexschema_core::Model), compares them with what a store
//! reports, and plans the create/drop/update/recreate steps that reconcile
//! the two. Planning never writes to the store.
//!
//! ## Example
//!
//! ```ignore
//! use flexschema_search::{InMemorySearchStore, SearchConfiguration, plan_search_view_migrations};
//! use tokio_util::sync::CancellationToken;
//!
//! let store = InMemorySearchStore::new().with_collection("deliveries", 120);
//! let plan = plan_search_view_migrations(
//!     &model,
//!     &store,
//!     &SearchConfiguration::default(),
//!     &CancellationToken::new(),
//! )
//! .await?;
//! ```

pub mod config;
pub mod definition;
pub mod diff;
pub mod error;
pub mod memory;
pub mod migration;
pub mod probe;
pub mod properties;

pub use config::SearchConfiguration;
pub use definition::{
    ArangoSearchDefinition, IDENTITY_ANALYZER, NORM_CI_ANALYZER, PrimarySortConfig,
    SEARCH_VIEW_PREFIX, required_views, view_name_for_collection,
};
pub use diff::{diff_search_views, plan_search_view_migrations};
pub use error::{MigrationError, StoreProbeError};
pub use memory::{InMemorySearchStore, StoreSnapshot};
pub use migration::{SchemaMigration, ViewMigration};
pub use probe::{ExistingView, StoreProbe};
pub use properties::{
    CollectionLink, StoreValues, ViewProperties, is_equal_properties, is_recreate_required,
    properties_for_definition,
};
