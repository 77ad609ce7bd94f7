//! Resolution of the rule set from a preset name or a TOML file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use lane_defence_core::Rules;

/// Built-in rule presets selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum RulesPreset {
    /// Single short level won at 10 points.
    Classic,
    /// Longer level with capped pickups that count towards the score.
    Extended,
}

impl RulesPreset {
    fn rules(self) -> Rules {
        match self {
            Self::Classic => Rules::classic(),
            Self::Extended => Rules::extended(),
        }
    }
}

/// Parses rules from TOML text; omitted keys keep their classic values.
pub(crate) fn parse_rules(text: &str) -> Result<Rules> {
    let rules: Rules = toml::from_str(text).context("failed to parse rules TOML")?;
    rules.validate().context("rules file describes an unplayable session")?;
    Ok(rules)
}

/// Loads the session rules, preferring an explicit file over the preset.
pub(crate) fn load_rules(preset: RulesPreset, path: Option<&Path>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(preset.rules());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file {}", path.display()))?;
    parse_rules(&text).with_context(|| format!("invalid rules file {}", path.display()))
}
