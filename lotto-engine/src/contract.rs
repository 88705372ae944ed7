use std::sync::Arc;

use anyhow::Result;

use crate::models::PredictionItem;

/// Frontière avec le moteur de calcul.
///
/// Les enregistrements renvoyés par `get_random_combos` et `filter_by_sum` suivent
/// le format de [`crate::models::format_combo`]. Les prédictions sont renvoyées dans
/// l'ordre de classement du moteur, qui fait foi.
pub trait Engine {
    /// Vérifie ou prépare les données. Idempotent ; `true` signifie que les
    /// autres appels sont valides.
    fn load_data(&self) -> Result<bool>;

    fn get_random_combos(&self, count: u32) -> Result<Vec<String>>;

    /// Peut renvoyer moins de `limit` enregistrements.
    fn filter_by_sum(&self, min: i64, max: i64, limit: u32) -> Result<Vec<String>>;

    fn predict_next_markov(
        &self,
        sum: i64,
        window: i64,
        top_n: u32,
        smoothing: f64,
    ) -> Result<Vec<PredictionItem>>;
}

impl<E: Engine + ?Sized> Engine for Arc<E> {
    fn load_data(&self) -> Result<bool> {
        (**self).load_data()
    }

    fn get_random_combos(&self, count: u32) -> Result<Vec<String>> {
        (**self).get_random_combos(count)
    }

    fn filter_by_sum(&self, min: i64, max: i64, limit: u32) -> Result<Vec<String>> {
        (**self).filter_by_sum(min, max, limit)
    }

    fn predict_next_markov(
        &self,
        sum: i64,
        window: i64,
        top_n: u32,
        smoothing: f64,
    ) -> Result<Vec<PredictionItem>> {
        (**self).predict_next_markov(sum, window, top_n, smoothing)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Le moteur n'a pas (ou plus) ses données : il faut relancer l'initialisation.
    #[error("Moteur non initialisé : chargez les données d'abord")]
    NotReady,
    #[error("{0}")]
    Rejected(String),
}

/// Vrai si l'erreur (ou une de ses causes) signale un moteur non initialisé.
pub fn is_not_ready(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<EngineError>(), Some(EngineError::NotReady)))
}
