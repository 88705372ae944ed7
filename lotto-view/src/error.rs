/// Saisie invalide : signalée immédiatement, sans appel au moteur ni changement
/// d'état de la zone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Nombre entier attendu pour « {field} » (reçu : {value:?})")]
    NotANumber { field: &'static str, value: String },
    #[error("« {field} » doit être au moins {min} (reçu : {value})")]
    TooSmall {
        field: &'static str,
        value: i64,
        min: i64,
    },
    #[error("« {field} » doit être au plus {max} (reçu : {value})")]
    TooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },
    #[error("Chargez d'abord les données du moteur")]
    OperationsDisabled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("Le moteur n'a pas pu charger ses données")]
    NotReady,
    #[error("{0}")]
    EngineFailed(String),
    #[error("Initialisation déjà en cours")]
    InProgress,
}
