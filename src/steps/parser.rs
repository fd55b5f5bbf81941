// src/steps/parser.rs

use std::sync::Arc;

use crate::content::Product;
use crate::dag::{SharedStore, UnitOutput};
use crate::errors::Result;

/// Pure transform of the raw seed into a [`Product`].
pub fn run(store: &SharedStore) -> Result<UnitOutput> {
    let product = Product::from_raw(store.raw_input())?;
    Ok(UnitOutput::Product(Arc::new(product)))
}
