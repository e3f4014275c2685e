//! Layered configuration: built-in defaults, then `config.toml`, then
//! `RESUMO_*` environment variables (`RESUMO_PDF__MARGIN_MM=15`).

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{error::Result, export::PdfSettings};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Simulated analysis time of the sample provider.
    pub latency_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self { latency_ms: 3000 }
    }
}

impl ProviderSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where exported files are saved.
    pub output_dir: PathBuf,
    pub provider: ProviderSettings,
    pub pdf: PdfSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            provider: ProviderSettings::default(),
            pdf: PdfSettings::default(),
        }
    }
}

/// `<config dir>/resumo/config.toml`, if the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("resumo").join("config.toml"))
}

/// Load the configuration. `file` replaces the default config file location;
/// a missing file is not an error.
pub fn load_config(file: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    let path = file.map(Path::to_path_buf).or_else(config_path);
    if let Some(path) = path.filter(|p| p.exists()) {
        tracing::debug!(path = %path.display(), "loading config file");
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("RESUMO_").split("__"));

    let config: Config = figment.extract().map_err(Box::new)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_file() {
        let config = load_config(Some(Path::new("/nonexistent/resumo.toml"))).unwrap();
        assert_eq!(config.provider.latency(), Duration::from_millis(3000));
        assert_eq!(config.pdf.margin_mm, 10);
    }

    #[test]
    fn file_overrides_defaults_and_keeps_the_rest() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "output_dir = \"/tmp/relatorios\"\n\n[pdf]\nmargin_mm = 20\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/relatorios"));
        assert_eq!(config.pdf.margin_mm, 20);
        assert_eq!(config.pdf.font_family, None);
        assert_eq!(config.provider.latency_ms, 3000);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider]\nlatency_ms = \"soon\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, crate::error::ResumoError::ConfigError(_)));
    }
}
