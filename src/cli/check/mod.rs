//! Check command - validates configuration and lists experiments

use std::path::Path;

use serde_json::json;

use super::{bootstrap, print_json};

pub fn run(config: Option<&Path>) -> anyhow::Result<()> {
    let service = bootstrap(config)?;

    let experiments: Vec<_> = service
        .registry()
        .iter()
        .enumerate()
        .map(|(position, definition)| {
            json!({
                "position": position,
                "type": definition.experiment_type(),
                "variations": definition.variations(),
                "weights": definition.weights(),
            })
        })
        .collect();

    print_json(&json!({
        "seeding": service.strategy(),
        "experiments": experiments,
    }))
}
