//! Séquencement des actions utilisateur contre le moteur.
//!
//! Chaque opération suit le même protocole : validation synchrone, passage de la
//! zone en chargement, un tour d'ordonnanceur rendu à l'appelant pour que
//! l'indicateur s'affiche, appel chronométré au moteur, puis règlement. Seule la
//! réponse portant le dernier numéro de séquence émis pour la zone est appliquée.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use lotto_engine::{Engine, is_not_ready};
use tracing::{info, warn};

use crate::config::ViewConfig;
use crate::error::{InitializationError, ValidationError};
use crate::form::{MarkovInputs, SumInputs, SumModeKind, SumModeToggle, read_pick_count};
use crate::record::parse_batch;
use crate::region::{Phase, RegionId, RegionMap, RegionState, Settlement};
use crate::render::{render_prediction_table, render_result_list};
use crate::tree::{Tone, VisualTree};

pub const MSG_INIT_LOADING: &str = "Initialisation des données...";
pub const MSG_INIT_READY: &str = "Prêt : combinaisons et modèle de Markov chargés";
pub const MSG_PICK_LOADING: &str = "Tirage en cours...";
pub const MSG_SUM_LOADING: &str = "Recherche en cours...";
pub const MSG_MARKOV_LOADING: &str = "Analyse prédictive en cours...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitControl {
    Ready,
    Busy,
    Retry,
    Hidden,
}

impl InitControl {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            InitControl::Ready => Some("Charger les données"),
            InitControl::Busy => Some("Chargement..."),
            InitControl::Retry => Some("Réessayer"),
            InitControl::Hidden => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, InitControl::Ready | InitControl::Retry)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub tone: Tone,
    pub text: String,
}

impl StatusLine {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub init: InitControl,
    pub operations_enabled: bool,
    pub status: Option<StatusLine>,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            init: InitControl::Ready,
            operations_enabled: false,
            status: None,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Restitue le bouton d'initialisation si l'appel est abandonné avant son règlement.
struct InitGuard<'a> {
    controls: &'a Mutex<Controls>,
    previous: Option<(InitControl, Option<StatusLine>)>,
}

impl InitGuard<'_> {
    fn disarm(mut self) {
        self.previous = None;
    }
}

impl Drop for InitGuard<'_> {
    fn drop(&mut self) {
        if let Some((init, status)) = self.previous.take() {
            warn!("initialisation abandonnée");
            let mut controls = lock(self.controls);
            controls.init = init;
            controls.status = status;
        }
    }
}

pub struct Orchestrator<E> {
    engine: E,
    config: ViewConfig,
    regions: Mutex<RegionMap>,
    controls: Mutex<Controls>,
    sum_mode: Mutex<SumModeToggle>,
}

impl<E: Engine> Orchestrator<E> {
    pub fn new(engine: E, config: ViewConfig) -> Self {
        Self {
            engine,
            config,
            regions: Mutex::new(RegionMap::default()),
            controls: Mutex::new(Controls::default()),
            sum_mode: Mutex::new(SumModeToggle::default()),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn region(&self, id: RegionId) -> RegionState {
        lock(&self.regions).get(id).clone()
    }

    pub fn phase(&self, id: RegionId) -> Phase {
        lock(&self.regions).get(id).phase().clone()
    }

    pub fn controls(&self) -> Controls {
        lock(&self.controls).clone()
    }

    /// Bascule le groupe de saisie visible ; aucune validation ici.
    pub fn set_sum_mode(&self, kind: SumModeKind) {
        lock(&self.sum_mode).select(kind);
    }

    pub fn sum_mode(&self) -> SumModeKind {
        lock(&self.sum_mode).active()
    }

    pub fn is_sum_group_visible(&self, kind: SumModeKind) -> bool {
        lock(&self.sum_mode).is_visible(kind)
    }

    pub async fn initialize(&self) -> Result<(), InitializationError> {
        let guard = {
            let mut controls = lock(&self.controls);
            if controls.operations_enabled {
                return Ok(());
            }
            if controls.init == InitControl::Busy {
                return Err(InitializationError::InProgress);
            }
            let previous = (controls.init, controls.status.take());
            controls.init = InitControl::Busy;
            controls.status = Some(StatusLine::new(Tone::Loading, MSG_INIT_LOADING));
            InitGuard {
                controls: &self.controls,
                previous: Some(previous),
            }
        };
        tokio::task::yield_now().await;

        let result = match self.engine.load_data() {
            Ok(true) => Ok(()),
            Ok(false) => Err(InitializationError::NotReady),
            Err(err) => Err(InitializationError::EngineFailed(err.to_string())),
        };
        guard.disarm();

        let mut controls = lock(&self.controls);
        match &result {
            Ok(()) => {
                info!("moteur prêt");
                controls.init = InitControl::Hidden;
                controls.operations_enabled = true;
                controls.status = Some(StatusLine::new(Tone::Success, MSG_INIT_READY));
            }
            Err(err) => {
                warn!(error = %err, "échec de l'initialisation");
                controls.init = InitControl::Retry;
                controls.operations_enabled = false;
                controls.status = Some(StatusLine::new(Tone::Error, format!("Erreur : {}", err)));
            }
        }
        result
    }

    /// Tirage aléatoire avec le nombre configuré.
    pub async fn pick_random(&self) -> Result<Settlement, ValidationError> {
        self.ensure_enabled()?;
        Ok(self.run_pick(self.config.pick_count).await)
    }

    pub async fn pick_random_count(&self, raw_count: &str) -> Result<Settlement, ValidationError> {
        self.ensure_enabled()?;
        let count = read_pick_count(raw_count)?;
        Ok(self.run_pick(count).await)
    }

    /// Lit le groupe de saisie actif ; une plage inversée est permutée.
    pub async fn filter_by_sum(&self, inputs: &SumInputs) -> Result<Settlement, ValidationError> {
        self.ensure_enabled()?;
        let (min, max) = inputs.read(self.sum_mode())?.bounds();
        let limit = self.config.filter_limit;
        let header = format!("Condition : somme {}~{}", min, max);

        let settlement = self
            .run(
                RegionId::SumFilter,
                MSG_SUM_LOADING,
                |engine| engine.filter_by_sum(min, max, limit),
                |records, elapsed_ms| {
                    let parsed = parse_batch(&records[..]);
                    render_result_list(&parsed, Some(elapsed_ms), Some(header.as_str()))
                },
            )
            .await;
        Ok(settlement)
    }

    pub async fn predict_markov(
        &self,
        inputs: &MarkovInputs,
    ) -> Result<Settlement, ValidationError> {
        self.ensure_enabled()?;
        let query = inputs.read()?;
        let smoothing = self.config.markov_smoothing;

        let settlement = self
            .run(
                RegionId::MarkovPredict,
                MSG_MARKOV_LOADING,
                |engine| {
                    engine.predict_next_markov(
                        query.current_sum,
                        query.window,
                        query.top_n,
                        smoothing,
                    )
                },
                |items, _| render_prediction_table(&items),
            )
            .await;
        Ok(settlement)
    }

    async fn run_pick(&self, count: u32) -> Settlement {
        self.run(
            RegionId::RandomPick,
            MSG_PICK_LOADING,
            |engine| engine.get_random_combos(count),
            |records, elapsed_ms| {
                render_result_list(&parse_batch(&records[..]), Some(elapsed_ms), None)
            },
        )
        .await
    }

    fn ensure_enabled(&self) -> Result<(), ValidationError> {
        if lock(&self.controls).operations_enabled {
            Ok(())
        } else {
            Err(ValidationError::OperationsDisabled)
        }
    }

    async fn run<T>(
        &self,
        region: RegionId,
        loading: &str,
        call: impl FnOnce(&E) -> anyhow::Result<T>,
        render: impl FnOnce(T, f64) -> VisualTree,
    ) -> Settlement {
        let ticket = lock(&self.regions).get_mut(region).begin(loading);
        let seq = ticket.seq();
        tokio::task::yield_now().await;

        let start = Instant::now();
        let outcome = call(&self.engine);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let phase = match outcome {
            Ok(data) => Phase::Success {
                tree: render(data, elapsed_ms),
                elapsed_ms,
            },
            Err(err) => {
                warn!(region = region.name(), seq, error = %err, "échec du moteur");
                if is_not_ready(&err) {
                    self.engine_lost(&err);
                }
                Phase::Error(err.to_string())
            }
        };

        let settlement = lock(&self.regions).settle(ticket, phase);
        if settlement == Settlement::Applied {
            info!(region = region.name(), seq, elapsed_ms, "zone mise à jour");
        }
        settlement
    }

    /// Le moteur a perdu ses données : les opérations sont désactivées et le
    /// bouton d'initialisation redevient utilisable.
    fn engine_lost(&self, err: &anyhow::Error) {
        let mut controls = lock(&self.controls);
        controls.operations_enabled = false;
        controls.init = InitControl::Retry;
        controls.status = Some(StatusLine::new(Tone::Error, format!("Erreur : {}", err)));
    }
}
