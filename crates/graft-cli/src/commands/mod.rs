pub mod build;
pub mod check;
pub mod dump;
pub mod extensions;
pub mod externals;
pub mod generate;
pub mod loader;
pub mod tree_sitter;

#[cfg(test)]
mod loader_tests;
#[cfg(test)]
mod tree_sitter_tests;
