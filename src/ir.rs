// Strongly-typed IR between inference and codegen. No serde_json::Value here.

/// Scalar kinds a JSON leaf can be inferred as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Integer,                 // fits losslessly in an i32
    Float,
    Boolean,
    DateTime,                // string accepted by the lenient date heuristic
    String,
    Unknown,                 // null, empty/mixed arrays → rendered as `object`
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Scalar(Scalar),
    Reference(String),       // name of an InferredType in the same TypeSet
    Container(Box<TypeRef>), // "sequence of T"; spelling chosen at codegen
}

impl TypeRef {
    pub const UNKNOWN: TypeRef = TypeRef::Scalar(Scalar::Unknown);

    pub fn container(element: TypeRef) -> Self {
        TypeRef::Container(Box::new(element))
    }

    /// `true` when this ref (or its element, for containers) names an object type.
    pub fn references_object(&self) -> bool {
        match self {
            TypeRef::Reference(_) => true,
            TypeRef::Container(inner) => inner.references_object(),
            TypeRef::Scalar(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub original_key: String, // literal JSON key
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredType {
    pub name: String,
    pub fields: Vec<Field>,  // JSON key order
}

/// Every type discovered by one inference run, in discovery order
/// (nested types before the type that introduced them, root last).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSet {
    pub types: Vec<InferredType>,
    pub root: String,
}

impl TypeSet {
    pub fn root_type(&self) -> Option<&InferredType> {
        self.types.iter().find(|t| t.name == self.root)
    }

    /// Root first, then the remaining types in discovery order.
    pub fn declaration_order(&self) -> impl Iterator<Item = &InferredType> {
        self.root_type()
            .into_iter()
            .chain(self.types.iter().filter(|t| t.name != self.root))
    }

    pub fn get(&self, name: &str) -> Option<&InferredType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize { self.types.len() }
    pub fn is_empty(&self) -> bool { self.types.is_empty() }
}
