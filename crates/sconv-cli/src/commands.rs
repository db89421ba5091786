use anyhow::{Context, Result};
use sconv_core::{MapperConfig, MappingReport};
use sconv_cli::demo::{build_registry, map_sample, parse_arguments};

use crate::cli::DemoArgs;
use crate::summary::RuleSummary;

/// Mapped demo value rendered as JSON, plus its warnings.
pub struct DemoOutcome {
    pub json: String,
    pub report: MappingReport,
}

pub fn run_demo(args: &DemoArgs) -> Result<DemoOutcome> {
    if args.no_warnings {
        sconv_core::set_warnings(false);
    }
    let registry = build_registry().context("register demo rules")?;
    let config = MapperConfig::default().with_clear_collections(!args.append);
    let arguments = parse_arguments(&args.args);

    let (user, report) = map_sample(&registry, config, &arguments).context("map sample user")?;
    let json = if args.compact {
        serde_json::to_string(&user)
    } else {
        serde_json::to_string_pretty(&user)
    }
    .context("serialize mapped user")?;

    Ok(DemoOutcome { json, report })
}

pub fn run_rules() -> Result<Vec<RuleSummary>> {
    let registry = build_registry().context("register demo rules")?;
    let mut summaries: Vec<RuleSummary> = registry
        .keys()
        .map(|key| RuleSummary {
            source: key.source().type_name().to_string(),
            target: key.target().type_name().to_string(),
            rules: registry
                .get(key.source(), key.target())
                .map_or(0, sconv_core::RuleSet::len),
        })
        .collect();
    summaries.sort_by(|a, b| a.source.cmp(&b.source));
    Ok(summaries)
}
