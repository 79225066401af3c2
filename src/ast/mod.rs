/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root and the node discriminants
/// - expressions: The expression node family
/// - statements: The statement node family
/// - types: Types inferred structurally from declarations
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
