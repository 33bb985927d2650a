use super::Loc;

/// Every node kind the inference engine understands.
///
/// Statements of the surface language (`let`, assignment, `return`, `if`,
/// `throw`, blocks) are expression nodes too; the ones that only make
/// sense inside a block are given a type of `undefined` when they appear
/// in expression position.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberLit),
    String(StringLit),
    Boolean(BooleanLit),
    Null(NullLit),
    Undefined(UndefinedLit),
    Ident(Ident),
    Binary(Binary),
    Call(Call),
    Function(FunctionExpr),
    Let(Let),
    Assign(Assign),
    Block(Block),
    Return(Return),
    If(If),
    Throw(Throw),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    pub value: f64,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    pub value: String,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLit {
    pub value: bool,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullLit {
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UndefinedLit {
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub loc: Loc,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Ident {
            name: name.into(),
            loc: Loc::default(),
        }
    }

    pub fn at(mut self, loc: Loc) -> Self {
        self.loc = loc;
        self
    }
}

/// Binary operators the checker understands. Anything else the surface
/// language allows is rejected by the parser collaborator before the
/// tree reaches inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `+`: numeric addition when both operands are numbers, string
    /// coercion otherwise.
    Add,
    /// `===`: always boolean.
    StrictEq,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub op: BinOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub loc: Loc,
}

/// Function parameter: either a bare name or a name with a default value,
/// whose inferred type becomes the parameter's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Name(Ident),
    Default(ParamDefault),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDefault {
    pub name: Ident,
    pub value: Box<Expr>,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Expr(Box<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub params: Vec<Param>,
    pub body: FunctionBody,
    pub loc: Loc,
}

/// `let name = value` introduces a fresh binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub name: Ident,
    pub value: Box<Expr>,
    pub loc: Loc,
}

/// `target = value` rewrites an existing binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: Ident,
    pub value: Box<Expr>,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<Expr>,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Box<Expr>,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub cond: Box<Expr>,
    pub then_block: Block,
    pub else_block: Option<Block>,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Throw {
    pub value: Box<Expr>,
    pub loc: Loc,
}

impl Expr {
    pub fn loc(&self) -> Loc {
        match self {
            Expr::Number(n) => n.loc,
            Expr::String(s) => s.loc,
            Expr::Boolean(b) => b.loc,
            Expr::Null(n) => n.loc,
            Expr::Undefined(u) => u.loc,
            Expr::Ident(i) => i.loc,
            Expr::Binary(b) => b.loc,
            Expr::Call(c) => c.loc,
            Expr::Function(f) => f.loc,
            Expr::Let(l) => l.loc,
            Expr::Assign(a) => a.loc,
            Expr::Block(b) => b.loc,
            Expr::Return(r) => r.loc,
            Expr::If(i) => i.loc,
            Expr::Throw(t) => t.loc,
        }
    }
}

// Thin construction helpers. The test suite and the demo driver build
// trees through these; a real front end fills in locations itself.
impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Number(NumberLit {
            value,
            loc: Loc::default(),
        })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::String(StringLit {
            value: value.into(),
            loc: Loc::default(),
        })
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Boolean(BooleanLit {
            value,
            loc: Loc::default(),
        })
    }

    pub fn null() -> Self {
        Expr::Null(NullLit {
            loc: Loc::default(),
        })
    }

    pub fn undefined() -> Self {
        Expr::Undefined(UndefinedLit {
            loc: Loc::default(),
        })
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(Ident::new(name))
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            loc: Loc::default(),
        })
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call(Call {
            callee: Box::new(callee),
            args,
            loc: Loc::default(),
        })
    }

    pub fn function(params: Vec<Param>, body: FunctionBody) -> Self {
        Expr::Function(FunctionExpr {
            params,
            body,
            loc: Loc::default(),
        })
    }

    pub fn let_binding(name: impl Into<String>, value: Expr) -> Self {
        Expr::Let(Let {
            name: Ident::new(name),
            value: Box::new(value),
            loc: Loc::default(),
        })
    }

    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Expr::Assign(Assign {
            target: Ident::new(target),
            value: Box::new(value),
            loc: Loc::default(),
        })
    }

    pub fn block(body: Vec<Expr>) -> Self {
        Expr::Block(Block {
            body,
            loc: Loc::default(),
        })
    }

    pub fn ret(value: Expr) -> Self {
        Expr::Return(Return {
            value: Box::new(value),
            loc: Loc::default(),
        })
    }

    pub fn if_then(cond: Expr, then_block: Block) -> Self {
        Expr::If(If {
            cond: Box::new(cond),
            then_block,
            else_block: None,
            loc: Loc::default(),
        })
    }

    pub fn if_else(cond: Expr, then_block: Block, else_block: Block) -> Self {
        Expr::If(If {
            cond: Box::new(cond),
            then_block,
            else_block: Some(else_block),
            loc: Loc::default(),
        })
    }

    pub fn throw(value: Expr) -> Self {
        Expr::Throw(Throw {
            value: Box::new(value),
            loc: Loc::default(),
        })
    }
}

impl Block {
    pub fn new(body: Vec<Expr>) -> Self {
        Block {
            body,
            loc: Loc::default(),
        }
    }
}

impl Param {
    pub fn name(name: impl Into<String>) -> Self {
        Param::Name(Ident::new(name))
    }

    pub fn with_default(name: impl Into<String>, value: Expr) -> Self {
        Param::Default(ParamDefault {
            name: Ident::new(name),
            value: Box::new(value),
            loc: Loc::default(),
        })
    }
}
