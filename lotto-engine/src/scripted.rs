//! Moteur scripté : rejoue des réponses préparées et journalise les appels.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Result, bail};

use crate::contract::{Engine, EngineError};
use crate::models::PredictionItem;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    LoadData,
    RandomCombos { count: u32 },
    FilterBySum { min: i64, max: i64, limit: u32 },
    PredictMarkov {
        sum: i64,
        window: i64,
        top_n: u32,
        smoothing: f64,
    },
}

/// File de réponses : `load_data`, enregistrements (tirage et filtre), prédictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Load,
    Records,
    Predictions,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Ready(bool),
    Records(Vec<String>),
    Predictions(Vec<PredictionItem>),
    NotReady,
    Failure(String),
}

/// Chaque file est consommée dans l'ordre. File vide : `load_data` renvoie `true`,
/// les autres appels une liste vide.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    state: Mutex<Script>,
}

#[derive(Debug, Default)]
struct Script {
    load: VecDeque<Reply>,
    records: VecDeque<Reply>,
    predictions: VecDeque<Reply>,
    calls: Vec<EngineCall>,
}

impl Script {
    fn queue(&mut self, channel: Channel) -> &mut VecDeque<Reply> {
        match channel {
            Channel::Load => &mut self.load,
            Channel::Records => &mut self.records,
            Channel::Predictions => &mut self.predictions,
        }
    }
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, channel: Channel, reply: Reply) -> &Self {
        self.lock().queue(channel).push_back(reply);
        self
    }

    pub fn push_ready(&self, ready: bool) -> &Self {
        self.push(Channel::Load, Reply::Ready(ready))
    }

    pub fn push_records(&self, records: &[&str]) -> &Self {
        self.push(
            Channel::Records,
            Reply::Records(records.iter().map(|r| r.to_string()).collect()),
        )
    }

    pub fn push_predictions(&self, items: &[(i64, f64)]) -> &Self {
        self.push(
            Channel::Predictions,
            Reply::Predictions(items.iter().map(|&(sum, p)| PredictionItem::new(sum, p)).collect()),
        )
    }

    pub fn push_failure(&self, channel: Channel, message: &str) -> &Self {
        self.push(channel, Reply::Failure(message.to_string()))
    }

    pub fn push_not_ready(&self, channel: Channel) -> &Self {
        self.push(channel, Reply::NotReady)
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next(&self, channel: Channel, call: EngineCall) -> Option<Reply> {
        let mut script = self.lock();
        script.calls.push(call);
        script.queue(channel).pop_front()
    }

    fn records(&self, call: EngineCall) -> Result<Vec<String>> {
        match self.next(Channel::Records, call) {
            None => Ok(Vec::new()),
            Some(Reply::Records(records)) => Ok(records),
            Some(other) => unexpected(other),
        }
    }
}

fn unexpected<T>(reply: Reply) -> Result<T> {
    match reply {
        Reply::NotReady => Err(EngineError::NotReady.into()),
        Reply::Failure(message) => Err(EngineError::Rejected(message).into()),
        other => bail!("Réponse scriptée inattendue : {:?}", other),
    }
}

impl Engine for ScriptedEngine {
    fn load_data(&self) -> Result<bool> {
        match self.next(Channel::Load, EngineCall::LoadData) {
            None => Ok(true),
            Some(Reply::Ready(ready)) => Ok(ready),
            Some(other) => unexpected(other),
        }
    }

    fn get_random_combos(&self, count: u32) -> Result<Vec<String>> {
        self.records(EngineCall::RandomCombos { count })
    }

    fn filter_by_sum(&self, min: i64, max: i64, limit: u32) -> Result<Vec<String>> {
        self.records(EngineCall::FilterBySum { min, max, limit })
    }

    fn predict_next_markov(
        &self,
        sum: i64,
        window: i64,
        top_n: u32,
        smoothing: f64,
    ) -> Result<Vec<PredictionItem>> {
        let call = EngineCall::PredictMarkov {
            sum,
            window,
            top_n,
            smoothing,
        };
        match self.next(Channel::Predictions, call) {
            None => Ok(Vec::new()),
            Some(Reply::Predictions(items)) => Ok(items),
            Some(other) => unexpected(other),
        }
    }
}
