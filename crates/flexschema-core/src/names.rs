//! Naming conventions shared by the schema passes.
//!
//! The generated type and field names are part of the public API surface, so
//! every pass derives them through these helpers.

/// Identifier field injected into root and child entities.
pub const ID_FIELD: &str = "id";
/// Creation timestamp field injected into root and child entities.
pub const ENTITY_CREATED_AT: &str = "createdAt";
/// Last-update timestamp field injected into root and child entities.
pub const ENTITY_UPDATED_AT: &str = "updatedAt";
/// Store-level key that the `id` field of a root entity maps to.
pub const KEY_FIELD: &str = "_key";

/// Directive names understood by the schema-text passes.
pub mod directives {
    pub const ROOT_ENTITY: &str = "rootEntity";
    pub const CHILD_ENTITY: &str = "childEntity";
    pub const ENTITY_EXTENSION: &str = "entityExtension";
    pub const VALUE_OBJECT: &str = "valueObject";
    pub const RELATION: &str = "relation";
    pub const REFERENCE: &str = "reference";
    pub const ROLES: &str = "roles";
    pub const CALC_MUTATIONS: &str = "calcMutations";
    pub const CALC_MUTATIONS_OPERATORS_ARG: &str = "operators";
}

pub fn create_input_type_name(type_name: &str) -> String {
    format!("Create{type_name}Input")
}

pub fn update_input_type_name(type_name: &str) -> String {
    format!("Update{type_name}Input")
}

pub fn update_all_input_type_name(type_name: &str) -> String {
    format!("UpdateAll{type_name}Input")
}

pub fn add_relation_field_name(field: &str) -> String {
    format!("add{}", capitalize(field))
}

pub fn remove_relation_field_name(field: &str) -> String {
    format!("remove{}", capitalize(field))
}

pub fn add_child_entities_field_name(field: &str) -> String {
    format!("add{}", capitalize(field))
}

pub fn update_child_entities_field_name(field: &str) -> String {
    format!("update{}", capitalize(field))
}

pub fn remove_child_entities_field_name(field: &str) -> String {
    format!("remove{}", capitalize(field))
}

/// Calc-mutation operators with the prefix of the input field each one adds.
pub const CALC_MUTATION_OPERATORS: &[(&str, &str)] = &[
    ("ADD", "add"),
    ("MULTIPLY", "multiplyWith"),
    ("SUBTRACT", "subtract"),
    ("DIVIDE", "divideBy"),
    ("MODULO", "moduloOf"),
    ("APPEND", "appendTo"),
    ("PREPEND", "prependTo"),
];

pub fn calc_mutation_prefix(operator: &str) -> Option<&'static str> {
    CALC_MUTATION_OPERATORS
        .iter()
        .find(|(name, _)| *name == operator)
        .map(|(_, prefix)| *prefix)
}

/// `add` + `Quantity` for operator `ADD` on field `quantity`.
pub fn calc_mutation_field_name(prefix: &str, field: &str) -> String {
    format!("{prefix}{}", capitalize(field))
}

/// Uppercases the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// English plural used when a root entity does not declare one.
pub fn pluralize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if let Some(stem) = name.strip_suffix('y') {
        let before_y = stem.chars().last();
        if !matches!(before_y, Some('a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{stem}ies");
        }
    }
    if lower.ends_with('s') || lower.ends_with('x') || lower.ends_with("ch") || lower.ends_with("sh")
    {
        return format!("{name}es");
    }
    format!("{name}s")
}

/// Collection holding the documents of a root entity type.
pub fn collection_name(plural_name: &str) -> String {
    decapitalize(plural_name)
}
