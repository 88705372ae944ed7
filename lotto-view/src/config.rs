use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Paramètres des requêtes envoyées au moteur. Les seuils de bandes et l'échelle
/// des barres sont des constantes fixes et n'apparaissent pas ici.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub pick_count: u32,
    pub filter_limit: u32,
    pub markov_smoothing: f64,
    pub default_window: i64,
    pub default_top_n: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            pick_count: 5,
            filter_limit: 20,
            markov_smoothing: 0.01,
            default_window: 5,
            default_top_n: 10,
        }
    }
}

/// Fichier absent : configuration par défaut.
pub fn load_config(path: &Path) -> Result<ViewConfig> {
    if !path.exists() {
        return Ok(ViewConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire la configuration {:?}", path))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Configuration invalide dans {:?}", path))?;
    Ok(config)
}

pub fn save_config(config: &ViewConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire la configuration {:?}", path))?;
    Ok(())
}
