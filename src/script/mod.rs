pub(crate) mod exec;
pub(crate) mod lexer;
pub(crate) mod parser;
