use serde::{Deserialize, Serialize};

/// Libellé de somme émis par le moteur dans chaque enregistrement.
pub const SUM_LABEL: &str = "합계";

/// Une ligne de prédiction de Markov, dans l'ordre de classement du moteur.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionItem {
    pub sum: i64,
    #[serde(alias = "prob")]
    pub probability: f64,
}

impl PredictionItem {
    pub fn new(sum: i64, probability: f64) -> Self {
        Self { sum, probability }
    }
}

pub fn combo_sum(numbers: &[u8]) -> u32 {
    numbers.iter().map(|&n| n as u32).sum()
}

/// Format texte d'un enregistrement : `#<index>: [a, b, ...] (합계: <somme>)`.
pub fn format_combo(index: u64, numbers: &[u8]) -> String {
    let numbers_str = numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("#{}: [{}] ({}: {})", index, numbers_str, SUM_LABEL, combo_sum(numbers))
}
