pub mod assemble;
pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod naming;
pub mod parse;
pub mod render;
pub mod select;
pub mod text;

#[cfg(test)]
mod tests;
