use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Float,
    Int,
    Json,
    String,
    Point,
}

impl Scalar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scalar::Float => "Float",
            Scalar::Int => "Int",
            Scalar::Json => "JSON",
            Scalar::String => "String",
            Scalar::Point => "Point",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output types that are not GraphQL built-ins and need their own
/// declaration appended to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecialType {
    Point,
}

impl SpecialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialType::Point => "point",
        }
    }

    pub fn definition(&self) -> &'static str {
        match self {
            SpecialType::Point => "type Point {\n  x: Float!\n  y: Float!\n}\n",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialTypeSet {
    types: BTreeSet<SpecialType>,
}

impl SpecialTypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the type was not already present.
    pub fn insert(&mut self, special: SpecialType) -> bool {
        self.types.insert(special)
    }

    pub fn contains(&self, special: SpecialType) -> bool {
        self.types.contains(&special)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = SpecialType> + '_ {
        self.types.iter().copied()
    }
}

/// Maps a native column type tag to a scalar. Unknown tags fall back to
/// `String`. The second value reports a special type the caller has to
/// declare separately.
pub fn classify(native_type: &str) -> (Scalar, Option<SpecialType>) {
    match native_type {
        "decimal" | "numeric" | "float" | "double" => (Scalar::Float, None),
        "integer" | "smallint" | "tinyint" | "mediumint" | "bigint" | "int" | "bit" => {
            (Scalar::Int, None)
        }
        "json" => (Scalar::Json, None),
        "geometry" | "point" => (Scalar::Point, Some(SpecialType::Point)),
        _ => (Scalar::String, None),
    }
}
