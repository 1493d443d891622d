use crate::config::{Filter, Format, Mode, PlotConfig};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load render parameters from a YAML file
pub fn load_config(config_path: &Path) -> Result<PlotConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open config file '{}'", config_path.display()))?;

    let config: PlotConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse config file '{}'", config_path.display()))?;

    Ok(config)
}

/// Command-line flags that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<Mode>,
    pub filter: Option<String>,
    pub format: Option<Format>,
}

/// Apply command-line overrides to a configuration
pub fn apply_cli_overrides(config: &mut PlotConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(mode) = overrides.mode {
        config.mode = mode;
    }

    if let Some(filter) = &overrides.filter {
        config.filter = Filter::new(filter)?;
    }

    if let Some(format) = overrides.format {
        config.format = format;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let yaml = r#"
mode: ovn
filter: "^web"
format: detailed
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.mode, Mode::Ovn);
        assert_eq!(config.format, Format::Detailed);
        assert!(config.filter.is_match("web1"));
        assert!(!config.filter.is_match("db"));
    }

    #[test]
    fn test_load_config_rejects_bad_filter() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "filter: \"[\"").unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = PlotConfig::default();
        let overrides = CliOverrides {
            mode: Some(Mode::OvnKubernetes),
            filter: Some("node1".to_string()),
            format: None,
        };

        apply_cli_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.mode, Mode::OvnKubernetes);
        assert_eq!(config.format, Format::Compact);
        assert_eq!(config.filter.as_str(), "node1");
    }

    #[test]
    fn test_empty_filter_override_resets_to_match_all() {
        let mut config = PlotConfig::default();
        let overrides = CliOverrides {
            filter: Some(String::new()),
            ..Default::default()
        };

        apply_cli_overrides(&mut config, &overrides).unwrap();
        assert!(config.filter.is_match("anything"));
    }
}
