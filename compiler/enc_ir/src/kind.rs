//! Token and syntax-node kinds.
//!
//! The kind set covers the language subset the edit-and-continue analysis
//! needs: type declarations (including records and primary constructors),
//! members, statements, expressions, lambdas and local functions.

use std::fmt;

/// Kind of a lexical token.
///
/// # Invariant
///
/// All discriminants must be < 128 so token sets fit in a `u128` bitset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // === Literals and names ===
    Identifier,
    NumericLiteral,
    StringLiteral,

    // === Declaration keywords ===
    Class,
    Struct,
    Record,
    Interface,

    // === Modifiers ===
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Async,
    Readonly,
    Const,
    Override,
    Virtual,
    Abstract,
    Sealed,
    Partial,
    Extern,

    // === Accessor keywords ===
    Get,
    Set,
    Init,

    // === Statement and expression keywords ===
    If,
    Else,
    While,
    Do,
    For,
    Foreach,
    In,
    Return,
    Yield,
    Break,
    Continue,
    Throw,
    Await,
    New,
    This,
    Base,
    True,
    False,
    Null,

    // === Punctuation ===
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,
    FatArrow,

    // === Operators ===
    Equals,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    EqualsEquals,
    BangEquals,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    AmpAmp,
    PipePipe,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    PlusPlus,
    MinusMinus,

    /// Character sequence the lexer could not classify.
    Unknown,
    EndOfFile,
}

impl TokenKind {
    /// Discriminant used by bitset token sets.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Fixed source text for keywords and punctuation; `None` for tokens
    /// whose text varies.
    pub const fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Identifier
            | TokenKind::NumericLiteral
            | TokenKind::StringLiteral
            | TokenKind::Unknown
            | TokenKind::EndOfFile => return None,
            TokenKind::Class => "class",
            TokenKind::Struct => "struct",
            TokenKind::Record => "record",
            TokenKind::Interface => "interface",
            TokenKind::Public => "public",
            TokenKind::Private => "private",
            TokenKind::Protected => "protected",
            TokenKind::Internal => "internal",
            TokenKind::Static => "static",
            TokenKind::Async => "async",
            TokenKind::Readonly => "readonly",
            TokenKind::Const => "const",
            TokenKind::Override => "override",
            TokenKind::Virtual => "virtual",
            TokenKind::Abstract => "abstract",
            TokenKind::Sealed => "sealed",
            TokenKind::Partial => "partial",
            TokenKind::Extern => "extern",
            TokenKind::Get => "get",
            TokenKind::Set => "set",
            TokenKind::Init => "init",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::Foreach => "foreach",
            TokenKind::In => "in",
            TokenKind::Return => "return",
            TokenKind::Yield => "yield",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Throw => "throw",
            TokenKind::Await => "await",
            TokenKind::New => "new",
            TokenKind::This => "this",
            TokenKind::Base => "base",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::FatArrow => "=>",
            TokenKind::Equals => "=",
            TokenKind::PlusEquals => "+=",
            TokenKind::MinusEquals => "-=",
            TokenKind::StarEquals => "*=",
            TokenKind::SlashEquals => "/=",
            TokenKind::EqualsEquals => "==",
            TokenKind::BangEquals => "!=",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::LessThanEquals => "<=",
            TokenKind::GreaterThanEquals => ">=",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Bang => "!",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
        };
        Some(text)
    }

    /// Returns `true` for tokens that may stand in for an identifier
    /// (contextual keywords).
    pub const fn is_contextual_identifier(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Get
                | TokenKind::Set
                | TokenKind::Init
                | TokenKind::Record
                | TokenKind::Partial
        )
    }

    /// Returns `true` for declaration modifiers.
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Private
                | TokenKind::Protected
                | TokenKind::Internal
                | TokenKind::Static
                | TokenKind::Async
                | TokenKind::Readonly
                | TokenKind::Const
                | TokenKind::Override
                | TokenKind::Virtual
                | TokenKind::Abstract
                | TokenKind::Sealed
                | TokenKind::Partial
                | TokenKind::Extern
        )
    }

    /// Returns `true` for compound and simple assignment operators.
    pub const fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
        )
    }

    /// Human-readable name used in parse errors.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::NumericLiteral => "numeric literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Unknown => "unknown character",
            TokenKind::EndOfFile => "end of file",
            other => other.fixed_text().unwrap_or("token"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed_text() {
            Some(text) => write!(f, "`{text}`"),
            None => f.write_str(self.display_name()),
        }
    }
}

/// Kind of a syntax node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    CompilationUnit,
    GlobalStatement,

    // === Type declarations ===
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    RecordDeclaration,
    RecordStructDeclaration,
    TypeParameterList,
    BaseList,
    SimpleBaseType,
    PrimaryConstructorBaseType,

    // === Members ===
    FieldDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    ThisConstructorInitializer,
    BaseConstructorInitializer,
    PropertyDeclaration,
    IndexerDeclaration,
    AccessorList,
    GetAccessorDeclaration,
    SetAccessorDeclaration,
    InitAccessorDeclaration,
    ArrowExpressionClause,
    EqualsValueClause,
    ParameterList,
    BracketedParameterList,
    Parameter,
    VariableDeclaration,
    VariableDeclarator,
    Type,
    TypeArgumentList,

    // === Statements ===
    Block,
    LocalDeclarationStatement,
    LocalFunctionStatement,
    ExpressionStatement,
    IfStatement,
    ElseClause,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForEachStatement,
    ReturnStatement,
    YieldReturnStatement,
    YieldBreakStatement,
    ThrowStatement,
    BreakStatement,
    ContinueStatement,
    EmptyStatement,

    // === Expressions ===
    IdentifierName,
    LiteralExpression,
    ParenthesizedExpression,
    BinaryExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    AssignmentExpression,
    ConditionalExpression,
    InvocationExpression,
    MemberAccessExpression,
    ElementAccessExpression,
    ObjectCreationExpression,
    AwaitExpression,
    ThisExpression,
    BaseExpression,
    SimpleLambdaExpression,
    ParenthesizedLambdaExpression,
    ArgumentList,
    BracketedArgumentList,
    Argument,

    /// Tokens the parser skipped during error recovery.
    Error,
}

impl SyntaxKind {
    /// Returns `true` for type declarations (including records).
    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration
                | SyntaxKind::StructDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::RecordDeclaration
                | SyntaxKind::RecordStructDeclaration
        )
    }

    /// Returns `true` for statement nodes.
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::LocalDeclarationStatement
                | SyntaxKind::LocalFunctionStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::DoStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::YieldReturnStatement
                | SyntaxKind::YieldBreakStatement
                | SyntaxKind::ThrowStatement
                | SyntaxKind::BreakStatement
                | SyntaxKind::ContinueStatement
                | SyntaxKind::EmptyStatement
        )
    }

    /// Returns `true` for expression nodes.
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::IdentifierName
                | SyntaxKind::LiteralExpression
                | SyntaxKind::ParenthesizedExpression
                | SyntaxKind::BinaryExpression
                | SyntaxKind::PrefixUnaryExpression
                | SyntaxKind::PostfixUnaryExpression
                | SyntaxKind::AssignmentExpression
                | SyntaxKind::ConditionalExpression
                | SyntaxKind::InvocationExpression
                | SyntaxKind::MemberAccessExpression
                | SyntaxKind::ElementAccessExpression
                | SyntaxKind::ObjectCreationExpression
                | SyntaxKind::AwaitExpression
                | SyntaxKind::ThisExpression
                | SyntaxKind::BaseExpression
                | SyntaxKind::SimpleLambdaExpression
                | SyntaxKind::ParenthesizedLambdaExpression
        )
    }

    /// Returns `true` for anonymous functions (not local functions).
    pub const fn is_lambda_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::SimpleLambdaExpression | SyntaxKind::ParenthesizedLambdaExpression
        )
    }

    /// Returns `true` for property/indexer accessors.
    pub const fn is_accessor(self) -> bool {
        matches!(
            self,
            SyntaxKind::GetAccessorDeclaration
                | SyntaxKind::SetAccessorDeclaration
                | SyntaxKind::InitAccessorDeclaration
        )
    }

    /// Returns `true` for `this(...)`/`base(...)` constructor initializers.
    pub const fn is_constructor_initializer(self) -> bool {
        matches!(
            self,
            SyntaxKind::ThisConstructorInitializer | SyntaxKind::BaseConstructorInitializer
        )
    }
}
