/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Program` root node
/// - conditions: The closed set of conditions tested by IF and WHILE
/// - statements: `Statement` and `Block`
pub mod ast;
pub mod conditions;
pub mod statements;
