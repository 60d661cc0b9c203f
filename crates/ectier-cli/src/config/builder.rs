use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::TieringArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use ectier::engine::config::TieringConfigBuilder;
use tracing::debug;

pub fn build_config(args: &TieringArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let file_config = apply_set_values(file_config, &args.set_values)?;

    let raw_targets = if args.target_ecs.is_empty() {
        file_config.target_ecs.clone().unwrap_or_default()
    } else {
        args.target_ecs.clone()
    };
    if raw_targets.is_empty() {
        return Err(CliError::Config(
            "At least one target EC is required, via --target-ec or `target-ecs` in the config file."
                .to_string(),
        ));
    }
    let target_ecs = raw_targets
        .iter()
        .map(|ec| parser::parse_ec_number(ec))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let learning_file = file_config.learning.unwrap_or_default();
    let min_seed_count = args
        .min_seed_count
        .or(learning_file.min_seed_count)
        .unwrap_or(defaults.min_seed_count);
    let min_seed_fraction = args
        .min_seed_fraction
        .or(learning_file.min_seed_fraction)
        .unwrap_or(defaults.min_seed_fraction);

    let use_hydrolase_proxy = if args.no_esther_proxy {
        false
    } else {
        file_config
            .fallback
            .unwrap_or_default()
            .hydrolase_proxy
            .unwrap_or(defaults.hydrolase_proxy)
    };

    let raw_code = args
        .specific_code
        .clone()
        .or(file_config.evidence.unwrap_or_default().specific_code)
        .unwrap_or(defaults.specific_code);
    let specific_code =
        parser::parse_evidence_code(&raw_code).map_err(|e| CliError::Argument(e.to_string()))?;

    let core_config = TieringConfigBuilder::new()
        .target_ecs(target_ecs)
        .min_seed_count(min_seed_count)
        .min_seed_fraction(min_seed_fraction)
        .use_hydrolase_proxy(use_hydrolase_proxy)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!(?core_config, specific_code = %specific_code, "Resolved tiering configuration.");

    Ok(AppConfig {
        input_path: args.input.clone(),
        core_config,
        specific_code,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value_str = value_str.trim();

        match key {
            "target-ecs" => {
                config.target_ecs = Some(
                    value_str
                        .split(',')
                        .map(str::trim)
                        .filter(|ec| !ec.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            "learning.min-seed-count" => {
                config
                    .learning
                    .get_or_insert_with(Default::default)
                    .min_seed_count = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "learning.min-seed-fraction" => {
                config
                    .learning
                    .get_or_insert_with(Default::default)
                    .min_seed_fraction = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "fallback.hydrolase-proxy" => {
                config
                    .fallback
                    .get_or_insert_with(Default::default)
                    .hydrolase_proxy = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            "evidence.specific-code" => {
                config
                    .evidence
                    .get_or_insert_with(Default::default)
                    .specific_code = Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
