//! SDL rendering.

use std::fmt::{self, Display, Formatter, Write};

use super::{
    Definition, Directive, Document, EnumTypeDefinition, FieldDefinition,
    InputObjectTypeDefinition, InputValueDefinition, NonNullType, ObjectTypeDefinition,
    ScalarTypeDefinition, TypeNode,
};

impl Display for TypeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(NonNullType::Named(name)) => write!(f, "{name}!"),
            Self::NonNull(NonNullType::List(inner)) => write!(f, "[{inner}]!"),
        }
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        f.write_char('(')?;
        for (i, (name, value)) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_char(')')
    }
}

fn write_directives(f: &mut Formatter<'_>, directives: &[Directive]) -> fmt::Result {
    for directive in directives {
        write!(f, " {directive}")?;
    }
    Ok(())
}

impl Display for FieldDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;
        write_directives(f, &self.directives)
    }
}

impl Display for InputValueDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;
        write_directives(f, &self.directives)
    }
}

fn write_block<T: Display>(
    f: &mut Formatter<'_>,
    keyword: &str,
    name: &str,
    directives: &[Directive],
    members: &[T],
) -> fmt::Result {
    write!(f, "{keyword} {name}")?;
    write_directives(f, directives)?;
    if members.is_empty() {
        return Ok(());
    }
    f.write_str(" {\n")?;
    for member in members {
        writeln!(f, "  {member}")?;
    }
    f.write_char('}')
}

impl Display for ObjectTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, "type", &self.name, &self.directives, &self.fields)
    }
}

impl Display for InputObjectTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, "input", &self.name, &self.directives, &self.fields)
    }
}

impl Display for EnumTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, "enum", &self.name, &self.directives, &self.values)
    }
}

impl Display for ScalarTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "scalar {}", self.name)?;
        write_directives(f, &self.directives)
    }
}

impl Display for Definition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(def) => def.fmt(f),
            Self::InputObject(def) => def.fmt(f),
            Self::Enum(def) => def.fmt(f),
            Self::Scalar(def) => def.fmt(f),
        }
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            definition.fmt(f)?;
        }
        Ok(())
    }
}
