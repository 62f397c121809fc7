//! Statement labels.

use enc_ir::{SyntaxKind, SyntaxNode};

/// Category a node is matched under. Declaration order is the matching
/// order: outer constructs before the statements they contain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    ConstructorDeclaration,
    ConstructorInitializer,
    LocalFunction,
    Lambda,
    If,
    Else,
    While,
    Do,
    For,
    ForEach,
    Block,
    LocalDeclarationStatement,
    LocalVariableDeclaration,
    VariableDeclarator,
    ExpressionStatement,
    Return,
    YieldReturn,
    YieldBreak,
    Throw,
    BreakContinue,
    Empty,
    ForStatementPart,
    Await,
}

impl Label {
    pub const COUNT: usize = Label::Await as usize + 1;

    pub const ALL: [Label; Label::COUNT] = [
        Label::ConstructorDeclaration,
        Label::ConstructorInitializer,
        Label::LocalFunction,
        Label::Lambda,
        Label::If,
        Label::Else,
        Label::While,
        Label::Do,
        Label::For,
        Label::ForEach,
        Label::Block,
        Label::LocalDeclarationStatement,
        Label::LocalVariableDeclaration,
        Label::VariableDeclarator,
        Label::ExpressionStatement,
        Label::Return,
        Label::YieldReturn,
        Label::YieldBreak,
        Label::Throw,
        Label::BreakContinue,
        Label::Empty,
        Label::ForStatementPart,
        Label::Await,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tied labels only match when their parents are matched to each other.
    #[inline]
    pub const fn is_tied_to_parent(self) -> bool {
        matches!(self, Label::Else)
    }

    /// Compound statements weigh header and body tokens separately.
    #[inline]
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            Label::LocalFunction
                | Label::Lambda
                | Label::If
                | Label::While
                | Label::Do
                | Label::For
                | Label::ForEach
        )
    }

    /// Label of `node`, or `None` when it is not matched on its own.
    pub fn classify(node: SyntaxNode<'_>) -> Option<Label> {
        let parent_kind = node.parent().map(|p| p.kind());
        let label = match node.kind() {
            SyntaxKind::ConstructorDeclaration => Label::ConstructorDeclaration,
            SyntaxKind::ThisConstructorInitializer | SyntaxKind::BaseConstructorInitializer => {
                Label::ConstructorInitializer
            }
            SyntaxKind::LocalFunctionStatement => Label::LocalFunction,
            SyntaxKind::SimpleLambdaExpression | SyntaxKind::ParenthesizedLambdaExpression => {
                Label::Lambda
            }
            SyntaxKind::IfStatement => Label::If,
            SyntaxKind::ElseClause => Label::Else,
            SyntaxKind::WhileStatement => Label::While,
            SyntaxKind::DoStatement => Label::Do,
            SyntaxKind::ForStatement => Label::For,
            SyntaxKind::ForEachStatement => Label::ForEach,
            SyntaxKind::Block => Label::Block,
            SyntaxKind::LocalDeclarationStatement => Label::LocalDeclarationStatement,
            SyntaxKind::VariableDeclaration if is_local_holder(parent_kind) => {
                Label::LocalVariableDeclaration
            }
            SyntaxKind::VariableDeclarator
                if is_local_holder(node.parent().and_then(|p| p.parent()).map(|g| g.kind())) =>
            {
                Label::VariableDeclarator
            }
            SyntaxKind::ExpressionStatement => Label::ExpressionStatement,
            SyntaxKind::ReturnStatement => Label::Return,
            SyntaxKind::YieldReturnStatement => Label::YieldReturn,
            SyntaxKind::YieldBreakStatement => Label::YieldBreak,
            SyntaxKind::ThrowStatement => Label::Throw,
            SyntaxKind::BreakStatement | SyntaxKind::ContinueStatement => Label::BreakContinue,
            SyntaxKind::EmptyStatement => Label::Empty,
            SyntaxKind::AwaitExpression => Label::Await,
            kind if kind.is_expression() && parent_kind == Some(SyntaxKind::ForStatement) => {
                Label::ForStatementPart
            }
            _ => return None,
        };
        Some(label)
    }
}

fn is_local_holder(kind: Option<SyntaxKind>) -> bool {
    matches!(
        kind,
        Some(SyntaxKind::LocalDeclarationStatement | SyntaxKind::ForStatement)
    )
}

/// Returns `true` if the node has a label.
pub fn has_label(node: SyntaxNode<'_>) -> bool {
    Label::classify(node).is_some()
}
