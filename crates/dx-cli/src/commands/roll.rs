use serde::Serialize;

use dx_mechanics::{CheckOutcome, CheckRequest, EngineConfig, Renderer, perform_check};

#[derive(Serialize)]
struct RollReport<'a> {
    request: &'a CheckRequest,
    outcome: &'a CheckOutcome,
    text: &'a str,
}

pub fn run(command: &str, config: &EngineConfig, json: bool) -> Result<(), String> {
    let request = super::parse(command)?;
    tracing::debug!(%request, die = %config.die, seed = ?config.seed, "parsed check");
    let mut rng = super::rng_for(config.seed);

    let outcome = perform_check(&request, config, &mut rng);
    let text = Renderer::from_config(config).render(&request, &outcome);

    if json {
        let report = RollReport {
            request: &request,
            outcome: &outcome,
            text: &text,
        };
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("failed to serialize result: {e}"))?;
        println!("{out}");
    } else {
        println!("{text}");
    }

    Ok(())
}
