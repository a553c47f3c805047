//! CLI utility to dump the static dashboard datasets as JSON.

use edgesense::dashboard::{DASHBOARD_DATA, DashboardSection, DashboardState};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    let mut state = DashboardState::default();
    if let Some(index) = options.scalability_index {
        state
            .select_scalability_dimension(index)
            .map_err(|err| err.to_string())?;
    }

    let value = match options.section.as_deref() {
        None => serde_json::to_value(DASHBOARD_DATA),
        Some(id) => {
            let section = DashboardSection::from_id(id)
                .ok_or_else(|| format!("Unknown section `{id}`\n\n{}", help_text()))?;
            Ok(section_value(section, &state))
        }
    }
    .map_err(|err| format!("Failed to serialize datasets: {err}"))?;

    let text = if options.compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    }
    .map_err(|err| format!("Failed to serialize datasets: {err}"))?;
    println!("{text}");
    Ok(())
}

/// The datasets one navigation page renders.
fn section_value(section: DashboardSection, state: &DashboardState) -> serde_json::Value {
    let data = DASHBOARD_DATA;
    match section {
        DashboardSection::Overview => serde_json::json!({
            "headline_metrics": data.headline_metrics,
            "system_specs": data.system_specs,
            "pipeline_stages": data.pipeline_stages,
        }),
        DashboardSection::Comparison => serde_json::json!({
            "models": data.models,
            "comparison_metrics": data.comparison_metrics,
        }),
        DashboardSection::Training => serde_json::json!({
            "training_curve": data.training_curve,
            "f1_scores": data.f1_scores,
            "confusion": data.confusion,
        }),
        DashboardSection::Deployment => serde_json::json!({
            "scalability": data.scalability,
            "selected_dimension": state.current_dimension(),
            "memory_footprint": data.memory_footprint,
        }),
        DashboardSection::About => serde_json::json!({
            "about_features": data.about_features,
        }),
    }
}

#[derive(Default)]
struct Options {
    section: Option<String>,
    scalability_index: Option<usize>,
    compact: bool,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--section" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--section requires a value".to_string())?;
                options.section = Some(value.to_string());
            }
            "--dimension-index" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--dimension-index requires a value".to_string())?;
                options.scalability_index = Some(
                    value
                        .parse()
                        .map_err(|_| format!("--dimension-index expects 0-3, got `{value}`"))?,
                );
            }
            "--compact" => {
                options.compact = true;
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn help_text() -> String {
    let sections = DashboardSection::ALL
        .iter()
        .map(|section| section.id())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Usage: edgesense-datasets [--section <id>] [--dimension-index <n>] [--compact]\n\n\
         Prints the dashboard datasets as JSON.\n\n\
         Sections: {sections}"
    )
}
