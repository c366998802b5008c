//! Node classification: output label and traversal directive per cursor kind.

use super::cursor::CursorKind;

/// Stable short label for a cursor kind. Total: any kind without a label
/// of its own maps to `"unknown"`.
pub fn node_label(kind: CursorKind) -> &'static str {
    use CursorKind::*;

    match kind {
        ObjCDynamicDecl => "dynamic",
        ObjCSynthesizeDecl => "synthesize",
        ObjCImplementationDecl => "implementation",
        ObjCCategoryImplDecl => "category-implementation",
        ObjCCategoryDecl => "category",
        ObjCInterfaceDecl => "interface",
        ObjCProtocolDecl => "protocol",
        TypedefDecl => "typedef",
        EnumDecl => "enumeration",
        EnumConstantDecl => "constant",
        MacroDefinition => "macro",
        MacroExpansion => "expansion",
        ObjCInstanceMethodDecl | ObjCClassMethodDecl | CXXMethod => "method",
        FunctionDecl => "function",
        UnionDecl => "union",
        StructDecl => "structure",
        ClassDecl => "class",
        CXXFinalAttr | CXXOverrideAttr | FieldDecl => "field",
        NamespaceAlias => "namespace-alias",
        Namespace => "namespace",

        // Expressions and statements
        ParenExpr => "enclosure",
        CallExpr => "invocation",
        ObjCMessageExpr => "message[objective-c]",
        InitListExpr => "initialization/list",
        CStyleCastExpr => "cast",
        LambdaExpr => "lambda",
        UnaryExpr => "unary",
        DeclRefExpr => "reference/name",
        MemberRefExpr => "reference/member",
        ObjCSelfExpr => "reference/self[objective-c]",
        CXXThisExpr => "reference/this[c++]",
        LabelStmt => "statement/label",
        CaseStmt => "statement/case",
        DeclStmt => "statement/declaration",
        NullStmt => "statement/null",
        IfStmt => "statement/if",
        SwitchStmt => "statement/switch",
        WhileStmt => "statement/while",
        DoStmt => "statement/do",
        ForStmt => "statement/for",
        GotoStmt => "statement/goto",
        ContinueStmt => "statement/continue",
        BreakStmt => "statement/break",
        ReturnStmt => "statement/return",
        CompoundStmt => "statement/group",
        ConditionalOperator => "operator/conditional",
        CompoundAssignOperator => "operator/compound-assignment",
        UnaryOperator => "operator/unary",
        BinaryOperator => "operator/binary",
        ArraySubscriptExpr => "routing/array-subscript",
        IntegerLiteral => "literal/integer",
        FloatingLiteral => "literal/float",
        ImaginaryLiteral => "literal/imaginary",
        StringLiteral => "literal/string",
        CharacterLiteral => "literal/character",
        ObjCStringLiteral => "literal/string[objective-c]",
        ObjCBoolLiteralExpr => "literal/bool[objective-c]",
        SizeOfPackExpr => "sizeof-packed[c++]",
        PackExpansionExpr => "pack-expansion[c++]",
        CXXThrowExpr => "throw[c++]",

        _ => "unknown",
    }
}

/// Declaration handlers of the traversal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Typedef,
    Enumeration,
    EnumConstant,
    Inclusion,
    Macro,
    Method,
    Function,
    Union,
    /// Struct-like container emitted under the given tag.
    Collection(&'static str),
    Field,
    NamespaceAlias,
    Namespace,
}

/// What the traversal does with a node of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Emit a wrapping element through the handler.
    Expand(Handler),
    /// Recurse without emitting anything.
    Flatten,
    /// Record an expression node, then recurse.
    EmitLeaf,
    /// Neither emit nor recurse.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disposition {
    pub label: &'static str,
    pub directive: Directive,
}

/// Directive for a kind. Pure: no frontend or writer access.
pub fn directive(kind: CursorKind) -> Directive {
    use CursorKind::*;

    match kind {
        TypedefDecl => Directive::Expand(Handler::Typedef),
        EnumDecl => Directive::Expand(Handler::Enumeration),
        EnumConstantDecl => Directive::Expand(Handler::EnumConstant),
        InclusionDirective => Directive::Expand(Handler::Inclusion),
        MacroDefinition => Directive::Expand(Handler::Macro),
        ObjCInstanceMethodDecl | ObjCClassMethodDecl | CXXMethod => {
            Directive::Expand(Handler::Method)
        }
        FunctionDecl => Directive::Expand(Handler::Function),
        UnionDecl => Directive::Expand(Handler::Union),
        StructDecl => Directive::Expand(Handler::Collection("structure")),
        ClassDecl => Directive::Expand(Handler::Collection("class")),
        ObjCImplementationDecl | ObjCCategoryImplDecl => {
            Directive::Expand(Handler::Collection("implementation"))
        }
        ObjCInterfaceDecl | ObjCCategoryDecl => Directive::Expand(Handler::Collection("interface")),
        ObjCProtocolDecl => Directive::Expand(Handler::Collection("protocol")),
        IBActionAttr | IBOutletAttr | IBOutletCollectionAttr | CXXFinalAttr | CXXOverrideAttr
        | ObjCPropertyDecl | ObjCIvarDecl | FieldDecl => Directive::Expand(Handler::Field),
        NamespaceAlias => Directive::Expand(Handler::NamespaceAlias),
        Namespace => Directive::Expand(Handler::Namespace),

        ObjCSynthesizeDecl | ObjCDynamicDecl | TypeAliasDecl | IntegerLiteral
        | FloatingLiteral | ImaginaryLiteral | StringLiteral | CharacterLiteral => Directive::Skip,

        UnexposedExpr | CompoundStmt | UnexposedStmt | OMPParallelDirective | NullStmt
        | ParenExpr | PreprocessingDirective => Directive::Flatten,

        // Unlisted kinds carrying a number in these ranges land here too.
        k if k.is_expression() || k.is_statement() => Directive::EmitLeaf,
        _ => Directive::Flatten,
    }
}

/// Label and directive together.
pub fn classify(kind: CursorKind) -> Disposition {
    Disposition { label: node_label(kind), directive: directive(kind) }
}
