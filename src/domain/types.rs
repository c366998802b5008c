//! Type descriptors reported by the frontend for declarations and expressions.

use serde::Deserialize;

macro_rules! type_kinds {
    ($($name:ident => $spelling:literal,)+) => {
        /// Kind of a type, spelled the way the frontend does. Spellings the
        /// table does not list are kept verbatim in [`TypeKind::Other`].
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum TypeKind {
            $($name,)+
            Other(String),
        }

        impl TypeKind {
            /// The frontend's spelling of the kind (`"Int"`, `"Pointer"`, ...).
            pub fn spelling(&self) -> &str {
                match self {
                    $(TypeKind::$name => $spelling,)+
                    TypeKind::Other(spelling) => spelling.as_str(),
                }
            }

            /// Resolve a spelling. Never fails: unlisted spellings become `Other`.
            pub fn from_spelling(s: &str) -> TypeKind {
                match s {
                    $($spelling => TypeKind::$name,)+
                    other => TypeKind::Other(other.to_string()),
                }
            }
        }
    };
}

type_kinds! {
    Invalid => "Invalid",
    Unexposed => "Unexposed",
    Void => "Void",
    Bool => "Bool",
    CharU => "Char_U",
    UChar => "UChar",
    Char16 => "Char16",
    Char32 => "Char32",
    UShort => "UShort",
    UInt => "UInt",
    ULong => "ULong",
    ULongLong => "ULongLong",
    UInt128 => "UInt128",
    CharS => "Char_S",
    SChar => "SChar",
    WChar => "WChar",
    Short => "Short",
    Int => "Int",
    Long => "Long",
    LongLong => "LongLong",
    Int128 => "Int128",
    Float => "Float",
    Double => "Double",
    LongDouble => "LongDouble",
    NullPtr => "NullPtr",
    Overload => "Overload",
    Dependent => "Dependent",
    ObjCId => "ObjCId",
    ObjCClass => "ObjCClass",
    ObjCSel => "ObjCSel",
    Complex => "Complex",
    Pointer => "Pointer",
    BlockPointer => "BlockPointer",
    LValueReference => "LValueReference",
    RValueReference => "RValueReference",
    Record => "Record",
    Enum => "Enum",
    Typedef => "Typedef",
    ObjCInterface => "ObjCInterface",
    ObjCObjectPointer => "ObjCObjectPointer",
    FunctionNoProto => "FunctionNoProto",
    FunctionProto => "FunctionProto",
    ConstantArray => "ConstantArray",
    Vector => "Vector",
    IncompleteArray => "IncompleteArray",
    VariableArray => "VariableArray",
    DependentSizedArray => "DependentSizedArray",
    MemberPointer => "MemberPointer",
    Auto => "Auto",
    Elaborated => "Elaborated",
}

impl TypeKind {
    /// Kinds that refer to another type through their pointee.
    pub fn is_indirection(&self) -> bool {
        matches!(
            self,
            TypeKind::Pointer
                | TypeKind::BlockPointer
                | TypeKind::LValueReference
                | TypeKind::RValueReference
                | TypeKind::ObjCObjectPointer
                | TypeKind::MemberPointer
        )
    }
}

impl From<String> for TypeKind {
    fn from(s: String) -> Self {
        TypeKind::from_spelling(&s)
    }
}

impl<'de> Deserialize<'de> for TypeKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(TypeKind::from)
    }
}

/// The declaration a type names, if any.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeDeclaration {
    pub spelling: String,
    /// Physical file of the declaration.
    #[serde(default)]
    pub origin: Option<String>,
}

/// A type as introspected through the frontend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CType {
    pub kind: TypeKind,
    #[serde(default)]
    pub spelling: String,
    #[serde(default)]
    pub declaration: Option<TypeDeclaration>,
    #[serde(default)]
    pub align: Option<u64>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub pointee: Option<Box<CType>>,
    #[serde(default)]
    pub element: Option<Box<CType>>,
    /// Constant extent of an array type; `None` for non-arrays and unsized arrays.
    #[serde(default)]
    pub array_size: Option<u64>,
}

impl CType {
    pub fn new(kind: TypeKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            declaration: None,
            align: None,
            size: None,
            pointee: None,
            element: None,
            array_size: None,
        }
    }

    /// Follow pointees down to the base type. Returns the base and the
    /// number of levels that were stripped. Typedefs are never looked through.
    pub fn strip_indirection(&self) -> (&CType, u32) {
        let mut current = self;
        let mut levels = 0;
        while current.kind.is_indirection() {
            match current.pointee.as_deref() {
                Some(next) => {
                    current = next;
                    levels += 1;
                }
                None => break,
            }
        }
        (current, levels)
    }

    /// Extents of nested arrays, outermost first, stopping at the first
    /// element without a known size.
    pub fn dimensions(&self) -> Vec<u64> {
        let mut dims = Vec::new();
        let mut current = Some(self);
        while let Some(t) = current {
            match t.array_size {
                Some(n) if t.kind != TypeKind::Invalid => dims.push(n),
                _ => break,
            }
            current = t.element.as_deref();
        }
        dims
    }
}
