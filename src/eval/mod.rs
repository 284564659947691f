pub(crate) mod bytecode;
pub(crate) mod evaluate;
pub(crate) mod lower;
pub(crate) mod vm;
