pub mod error;
pub mod id;
pub mod model;
pub mod names;
pub mod time;

pub use error::{ModelError, Result};
pub use id::generate_id;
pub use model::{
    BUILTIN_SCALARS, Field, FieldConfig, FieldId, FieldSearchOptions, FieldType, Model,
    ModelConfig, ObjectType, ObjectTypeId, OrderDirection, PrimarySortClause, PrimarySortConfig,
    RootEntityOptions, SearchLanguage, TypeConfig, TypeKind, is_builtin_scalar,
};
pub use time::Timestamp;
