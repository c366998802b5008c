//! Cursor-kind vocabulary of the C-family frontend.
//!
//! Numbers follow the frontend's so that the category predicates can be
//! expressed as ranges, the same way the frontend does. Kinds missing from
//! the table still classify by their number.

macro_rules! cursor_kinds {
    ($($name:ident = $value:literal,)+) => {
        /// Kind of an AST node as reported by the language frontend.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum CursorKind {
            $($name,)+
            /// A kind this table does not list, with the frontend's number
            /// for it when one is known.
            Unknown(Option<u32>),
        }

        impl CursorKind {
            /// Every listed kind, in numeric order.
            pub const ALL: &'static [CursorKind] = &[$(CursorKind::$name,)+];

            /// The frontend's name for this kind.
            pub fn name(&self) -> &'static str {
                match self {
                    $(CursorKind::$name => stringify!($name),)+
                    CursorKind::Unknown(_) => "Unknown",
                }
            }

            /// The frontend's number for this kind.
            pub fn value(&self) -> Option<u32> {
                match self {
                    $(CursorKind::$name => Some($value),)+
                    CursorKind::Unknown(value) => *value,
                }
            }

            /// Resolve a kind from the frontend's name for it.
            pub fn from_name(s: &str) -> Option<CursorKind> {
                match s {
                    $(stringify!($name) => Some(CursorKind::$name),)+
                    _ => None,
                }
            }

            pub fn from_value(value: u32) -> Option<CursorKind> {
                match value {
                    $($value => Some(CursorKind::$name),)+
                    _ => None,
                }
            }
        }
    };
}

cursor_kinds! {
    UnexposedDecl = 1,
    StructDecl = 2,
    UnionDecl = 3,
    ClassDecl = 4,
    EnumDecl = 5,
    FieldDecl = 6,
    EnumConstantDecl = 7,
    FunctionDecl = 8,
    VarDecl = 9,
    ParmDecl = 10,
    ObjCInterfaceDecl = 11,
    ObjCCategoryDecl = 12,
    ObjCProtocolDecl = 13,
    ObjCPropertyDecl = 14,
    ObjCIvarDecl = 15,
    ObjCInstanceMethodDecl = 16,
    ObjCClassMethodDecl = 17,
    ObjCImplementationDecl = 18,
    ObjCCategoryImplDecl = 19,
    TypedefDecl = 20,
    CXXMethod = 21,
    Namespace = 22,
    LinkageSpec = 23,
    Constructor = 24,
    Destructor = 25,
    ConversionFunction = 26,
    TemplateTypeParameter = 27,
    NonTypeTemplateParameter = 28,
    TemplateTemplateParameter = 29,
    FunctionTemplate = 30,
    ClassTemplate = 31,
    ClassTemplatePartialSpecialization = 32,
    NamespaceAlias = 33,
    UsingDirective = 34,
    UsingDeclaration = 35,
    TypeAliasDecl = 36,
    ObjCSynthesizeDecl = 37,
    ObjCDynamicDecl = 38,
    CXXAccessSpecifier = 39,

    ObjCSuperClassRef = 40,
    ObjCProtocolRef = 41,
    ObjCClassRef = 42,
    TypeRef = 43,
    CXXBaseSpecifier = 44,
    TemplateRef = 45,
    NamespaceRef = 46,
    MemberRef = 47,
    LabelRef = 48,
    OverloadedDeclRef = 49,
    VariableRef = 50,

    InvalidFile = 70,
    NoDeclFound = 71,
    NotImplemented = 72,
    InvalidCode = 73,

    UnexposedExpr = 100,
    DeclRefExpr = 101,
    MemberRefExpr = 102,
    CallExpr = 103,
    ObjCMessageExpr = 104,
    BlockExpr = 105,
    IntegerLiteral = 106,
    FloatingLiteral = 107,
    ImaginaryLiteral = 108,
    StringLiteral = 109,
    CharacterLiteral = 110,
    ParenExpr = 111,
    UnaryOperator = 112,
    ArraySubscriptExpr = 113,
    BinaryOperator = 114,
    CompoundAssignOperator = 115,
    ConditionalOperator = 116,
    CStyleCastExpr = 117,
    CompoundLiteralExpr = 118,
    InitListExpr = 119,
    AddrLabelExpr = 120,
    StmtExpr = 121,
    GenericSelectionExpr = 122,
    GNUNullExpr = 123,
    CXXStaticCastExpr = 124,
    CXXDynamicCastExpr = 125,
    CXXReinterpretCastExpr = 126,
    CXXConstCastExpr = 127,
    CXXFunctionalCastExpr = 128,
    CXXTypeidExpr = 129,
    CXXBoolLiteralExpr = 130,
    CXXNullPtrLiteralExpr = 131,
    CXXThisExpr = 132,
    CXXThrowExpr = 133,
    CXXNewExpr = 134,
    CXXDeleteExpr = 135,
    UnaryExpr = 136,
    ObjCStringLiteral = 137,
    ObjCEncodeExpr = 138,
    ObjCSelectorExpr = 139,
    ObjCProtocolExpr = 140,
    ObjCBridgedCastExpr = 141,
    PackExpansionExpr = 142,
    SizeOfPackExpr = 143,
    LambdaExpr = 144,
    ObjCBoolLiteralExpr = 145,
    ObjCSelfExpr = 146,

    UnexposedStmt = 200,
    LabelStmt = 201,
    CompoundStmt = 202,
    CaseStmt = 203,
    DefaultStmt = 204,
    IfStmt = 205,
    SwitchStmt = 206,
    WhileStmt = 207,
    DoStmt = 208,
    ForStmt = 209,
    GotoStmt = 210,
    IndirectGotoStmt = 211,
    ContinueStmt = 212,
    BreakStmt = 213,
    ReturnStmt = 214,
    GCCAsmStmt = 215,
    ObjCAtTryStmt = 216,
    ObjCAtCatchStmt = 217,
    ObjCAtFinallyStmt = 218,
    ObjCAtThrowStmt = 219,
    ObjCAtSynchronizedStmt = 220,
    ObjCAutoreleasePoolStmt = 221,
    ObjCForCollectionStmt = 222,
    CXXCatchStmt = 223,
    CXXTryStmt = 224,
    CXXForRangeStmt = 225,
    SEHTryStmt = 226,
    SEHExceptStmt = 227,
    SEHFinallyStmt = 228,
    MSAsmStmt = 229,
    NullStmt = 230,
    DeclStmt = 231,
    // `LastStmt` of the frontend revision this table follows.
    OMPParallelDirective = 232,

    TranslationUnit = 300,

    UnexposedAttr = 400,
    IBActionAttr = 401,
    IBOutletAttr = 402,
    IBOutletCollectionAttr = 403,
    CXXFinalAttr = 404,
    CXXOverrideAttr = 405,
    AnnotateAttr = 406,
    AsmLabelAttr = 407,

    PreprocessingDirective = 500,
    MacroDefinition = 501,
    MacroExpansion = 502,
    InclusionDirective = 503,
}

impl CursorKind {
    /// Resolve a kind by name, falling back to its number. Never fails.
    pub fn resolve(name: &str, value: Option<u32>) -> CursorKind {
        CursorKind::from_name(name)
            .or_else(|| value.and_then(CursorKind::from_value))
            .unwrap_or(CursorKind::Unknown(value))
    }

    fn in_range(&self, range: std::ops::RangeInclusive<u32>) -> bool {
        self.value().is_some_and(|v| range.contains(&v))
    }

    pub fn is_invalid(&self) -> bool {
        self.in_range(70..=73)
    }

    pub fn is_expression(&self) -> bool {
        self.in_range(100..=199)
    }

    pub fn is_statement(&self) -> bool {
        self.in_range(200..=299)
    }
}

impl std::fmt::Display for CursorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip_covers_all_kinds() {
        for kind in CursorKind::ALL {
            assert_eq!(CursorKind::from_name(kind.name()), Some(*kind));
            assert_eq!(kind.value().and_then(CursorKind::from_value), Some(*kind));
        }
        assert_eq!(CursorKind::from_name("NoSuchDecl"), None);
    }

    #[test]
    fn test_categories() {
        assert!(CursorKind::CallExpr.is_expression());
        assert!(CursorKind::ObjCSelfExpr.is_expression());
        assert!(CursorKind::IfStmt.is_statement());
        assert!(CursorKind::DeclStmt.is_statement());
        assert!(CursorKind::NoDeclFound.is_invalid());
        assert!(!CursorKind::TranslationUnit.is_expression());
        assert!(!CursorKind::TranslationUnit.is_statement());
    }

    #[test]
    fn test_resolve_never_fails() {
        assert_eq!(CursorKind::resolve("FunctionDecl", None), CursorKind::FunctionDecl);
        assert_eq!(CursorKind::resolve("Renamed", Some(103)), CursorKind::CallExpr);
        assert_eq!(CursorKind::resolve("StaticAssert", Some(602)), CursorKind::Unknown(Some(602)));
        assert_eq!(CursorKind::resolve("StaticAssert", None), CursorKind::Unknown(None));

        let newer_expr = CursorKind::resolve("ObjCAvailabilityCheckExpr", Some(148));
        assert!(newer_expr.is_expression());
        assert_eq!(newer_expr.to_string(), "Unknown");
        assert!(!CursorKind::Unknown(None).is_statement());
    }

    #[test]
    fn test_values_are_ordered() {
        let values: Vec<u32> = CursorKind::ALL.iter().filter_map(|k| k.value()).collect();
        assert_eq!(values.len(), CursorKind::ALL.len());
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(values, sorted);
    }
}
