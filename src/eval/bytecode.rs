#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ConstIdx(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    PushConst(ConstIdx),

    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    MulHi,
}

/// Postfix program for one expression tree.
#[derive(Debug, Clone, Default)]
pub(crate) struct BytecodeProgram {
    pub(crate) ops: Vec<Op>,
    pub(crate) consts: Vec<i64>,
}

impl BytecodeProgram {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_const(&mut self, c: i64) -> ConstIdx {
        let idx = ConstIdx(self.consts.len() as u32);
        self.consts.push(c);
        idx
    }
}
