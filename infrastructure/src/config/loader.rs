//! Configuration file loader with multi-source merging

use super::file_config::{
    DEEPSEEK_API_KEY_ENV, FileConfig, NASA_ADS_KEY_ENV, OPENAI_API_KEY_ENV,
};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "virtual-lab";
const PROJECT_FILES: [&str; 2] = ["virtual_lab.toml", ".virtual_lab.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `OPENAI_API_KEY`, `DEEPSEEK_API_KEY`, `NASA_ADS_KEY`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./virtual_lab.toml` or `./.virtual_lab.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/virtual-lab/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Load defaults plus environment credentials only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        let figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Layer the credential environment variables on top
    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(
                Env::raw()
                    .only(&[OPENAI_API_KEY_ENV])
                    .map(|_| "api_keys.openai".into()),
            )
            .merge(
                Env::raw()
                    .only(&[DEEPSEEK_API_KEY_ENV])
                    .map(|_| "api_keys.deepseek".into()),
            )
            .merge(
                Env::raw()
                    .only(&[NASA_ADS_KEY_ENV])
                    .map(|_| "api_keys.nasa_ads".into()),
            )
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/virtual-lab/config.toml` if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config sources being considered (for --show-config)
    pub fn describe_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (highest priority first):".to_string()];

        lines.push(format!(
            "  [ENV  ] {}, {}, {}",
            OPENAI_API_KEY_ENV, DEEPSEEK_API_KEY_ENV, NASA_ADS_KEY_ENV
        ));

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{:<5}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!(
                "  [     ] Project: ./{} or ./{}",
                PROJECT_FILES[0], PROJECT_FILES[1]
            )),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_domain::Model;

    #[test]
    fn test_describe_sources_highest_priority_first() {
        let lines = ConfigLoader::describe_sources(Some(Path::new("missing-virtual-lab.toml")));

        assert_eq!(lines[0], "Configuration sources (highest priority first):");
        assert_eq!(lines.iter().filter(|l| l.contains("sources")).count(), 1);
        assert!(lines[1].starts_with("  [ENV  ]"));
        assert_eq!(
            lines[2],
            "  [MISSING] Explicit: missing-virtual-lab.toml"
        );
        assert_eq!(lines.last().unwrap(), "  [     ] Default: built-in defaults");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("virtual-lab"));
    }

    #[test]
    fn test_explicit_file_and_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [api_keys]
                openai = "from-file"
                deepseek = "ds-from-file"

                [meeting]
                model = "gpt-4o"
                rounds = 4

                [pricing."gpt-4o"]
                input_per_million = 2.5
                output_per_million = 10.0
                "#,
            )?;
            jail.set_env("OPENAI_API_KEY", "from-env");

            let config = ConfigLoader::load(Some(Path::new("custom.toml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.api_keys.openai.as_deref(), Some("from-env"));
            assert_eq!(config.api_keys.deepseek.as_deref(), Some("ds-from-file"));
            assert_eq!(config.meeting.model, Model::Gpt4o);
            assert_eq!(config.meeting.rounds, Some(4));
            // File prices merge into the built-in table
            assert_eq!(
                config.pricing.get("gpt-4o").map(|p| p.input_per_million),
                Some(2.5)
            );
            assert!(config.pricing.get("gpt-3.5-turbo").is_some());
            Ok(())
        });
    }

    #[test]
    fn test_project_file_discovered() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                ".virtual_lab.toml",
                r#"
                [meeting]
                temperature = 0.8
                "#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.meeting.temperature, 0.8);
            Ok(())
        });
    }

    #[test]
    fn test_load_defaults_reads_env_only() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("virtual_lab.toml", "[meeting]\nrounds = 9\n")?;
            jail.set_env("NASA_ADS_KEY", "ads-env");

            let config = ConfigLoader::load_defaults().map_err(|e| e.to_string())?;
            assert_eq!(config.meeting.rounds, None);
            assert_eq!(config.api_keys.nasa_ads(), Some("ads-env"));
            Ok(())
        });
    }
}
