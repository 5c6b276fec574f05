pub mod presentation;
pub mod recommendations;
pub mod stopwords;
pub mod tfidf;

pub use presentation::{truncate, Decorations, ProductCard, RandomDecorations};
pub use recommendations::recommend;
