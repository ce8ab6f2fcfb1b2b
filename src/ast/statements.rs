use std::slice::Iter;

use super::{ast::Variable, expressions::{Call, Expr}};

/// An ordered statement list; order of `members` is execution order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub members: Vec<Stmt>,
}

impl Block {
    pub fn new(members: Vec<Stmt>) -> Self {
        Block { members }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Skip,
    Block(Block),
    Assignment {
        target: Variable,
        source: Expr,
    },
    Conditional {
        test: Expr,
        then_branch: Box<Stmt>,
        /// `Skip` when the source has no `else`.
        else_branch: Box<Stmt>,
    },
    Loop {
        test: Expr,
        body: Box<Stmt>,
    },
    Call(Call),
    /// `target` is the name of the function the `return` appears in.
    Return {
        target: Variable,
        result: Expr,
    },
}

impl Stmt {
    pub fn contains_generic_operator(&self) -> bool {
        match self {
            Stmt::Skip => false,
            Stmt::Block(block) => block.iter().any(Stmt::contains_generic_operator),
            Stmt::Assignment { source, .. } => source.contains_generic_operator(),
            Stmt::Conditional { test, then_branch, else_branch } => {
                test.contains_generic_operator()
                    || then_branch.contains_generic_operator()
                    || else_branch.contains_generic_operator()
            }
            Stmt::Loop { test, body } => {
                test.contains_generic_operator() || body.contains_generic_operator()
            }
            Stmt::Call(call) => call.args.iter().any(Expr::contains_generic_operator),
            Stmt::Return { result, .. } => result.contains_generic_operator(),
        }
    }
}
