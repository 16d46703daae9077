//! Presentation of results
//!
//! Values are rounded to two decimals here and nowhere else; the engine's
//! results keep full precision.

use clap::ValueEnum;
use color_eyre::eyre::Result;
use finsim_core::ScenarioResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Copy of `result` with every float rounded for display
pub fn rounded(result: &ScenarioResult) -> ScenarioResult {
    let mut out = result.clone();
    for value in [
        &mut out.percentile_10,
        &mut out.percentile_25,
        &mut out.percentile_50,
        &mut out.percentile_75,
        &mut out.percentile_90,
        &mut out.mean,
        &mut out.std_dev,
        &mut out.min_value,
        &mut out.max_value,
        &mut out.probability_success,
        &mut out.confidence_interval.0,
        &mut out.confidence_interval.1,
        &mut out.processing_time_ms,
    ] {
        *value = round2(*value);
    }
    out
}

/// Format a percentage value
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn render_text(result: &ScenarioResult) -> String {
    let r = rounded(result);
    let mut lines = vec![
        format!("Scenario: {}", r.scenario_name),
        format!("Iterations: {}", r.iterations),
        format!(
            "Success probability: {}",
            format_percentage(result.probability_success)
        ),
        String::new(),
        "Percentiles:".to_string(),
    ];
    lines.extend(
        r.percentiles()
            .iter()
            .map(|(p, v)| format!("  p{p:<3} {v:>12.2}")),
    );
    lines.extend([
        String::new(),
        format!("Mean:     {:.2}", r.mean),
        format!("Std dev:  {:.2}", r.std_dev),
        format!("Range:    {:.2} .. {:.2}", r.min_value, r.max_value),
        format!(
            "95% CI:   {:.2} .. {:.2}",
            r.confidence_interval.0, r.confidence_interval.1
        ),
        String::new(),
        format!("Distribution: {}", r.metadata.distribution_type),
        format!(
            "Converged:    {}",
            if r.metadata.convergence_achieved { "yes" } else { "no" }
        ),
        format!("Outliers:     {}", r.metadata.outliers_detected),
        format!("Time:         {:.2} ms", r.processing_time_ms),
    ]);
    lines.join("\n")
}

pub fn render_json(result: &ScenarioResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&rounded(result))?)
}

/// Render several results; JSON output is a single array
pub fn render_many(results: &[ScenarioResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(results
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n\n")),
        OutputFormat::Json => {
            let rounded: Vec<_> = results.iter().map(rounded).collect();
            Ok(serde_json::to_string_pretty(&rounded)?)
        }
    }
}

pub fn render(result: &ScenarioResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(result),
    }
}
