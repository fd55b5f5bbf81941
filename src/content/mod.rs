// src/content/mod.rs

//! Typed records that flow between step units.
//!
//! - [`product`] holds the parsed [`Product`] record.
//! - [`question`] holds generated [`Question`]s and their categories.
//! - [`document`] holds the three canonical page documents.
//! - [`sample`] is the built-in seed product.

pub mod document;
pub mod product;
pub mod question;
pub mod sample;

pub use document::{Document, FaqItem, ProductSections};
pub use product::Product;
pub use question::{Question, QuestionCategory};
pub use sample::sample_input;
