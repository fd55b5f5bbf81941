#![allow(dead_code)]

use std::sync::Arc;

use contentdag::content::{Product, sample_input};
use contentdag::dag::{SchedulerOptions, StepUnit};
use contentdag::engine::Pipeline;
use contentdag::llm::CompletionService;
use contentdag::steps::StepRunner;
use contentdag::types::{ExecutionMode, UnitId};

/// The built-in sample product, parsed.
pub fn sample_product() -> Product {
    Product::from_raw(&sample_input()).expect("sample input is a valid product")
}

/// Builder for `Product` to simplify test setup.
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            product: Product {
                name: name.to_string(),
                concentration: String::new(),
                skin_type: vec![],
                key_ingredients: vec![],
                benefits: vec![],
                how_to_use: String::new(),
                side_effects: String::new(),
                price: String::new(),
            },
        }
    }

    pub fn concentration(mut self, c: &str) -> Self {
        self.product.concentration = c.to_string();
        self
    }

    pub fn skin_types(mut self, types: &[&str]) -> Self {
        self.product.skin_type = types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn ingredients(mut self, items: &[&str]) -> Self {
        self.product.key_ingredients = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn benefits(mut self, items: &[&str]) -> Self {
        self.product.benefits = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn price(mut self, p: &str) -> Self {
        self.product.price = p.to_string();
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

/// Units with explicit dependency lists, in the given declaration order.
pub fn units(layout: &[(UnitId, &[UnitId])]) -> Vec<StepUnit> {
    layout.iter()
        .map(|(id, deps)| StepUnit::with_dependencies(*id, deps.iter().copied()))
        .collect()
}

pub fn options(mode: ExecutionMode) -> SchedulerOptions {
    SchedulerOptions {
        mode,
        ..SchedulerOptions::default()
    }
}

/// Default pipeline running the real step bodies over `completion`.
pub fn pipeline(completion: Arc<dyn CompletionService>, mode: ExecutionMode) -> Pipeline {
    Pipeline::new(Arc::new(StepRunner::new(completion)), options(mode))
        .expect("default unit graph is valid")
}
