use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::tree::VisualTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionId {
    RandomPick,
    SumFilter,
    MarkovPredict,
}

impl RegionId {
    pub const ALL: [RegionId; 3] = [
        RegionId::RandomPick,
        RegionId::SumFilter,
        RegionId::MarkovPredict,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RegionId::RandomPick => "random-pick",
            RegionId::SumFilter => "sum-filter",
            RegionId::MarkovPredict => "markov-predict",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading(String),
    Success { tree: VisualTree, elapsed_ms: f64 },
    Error(String),
}

/// Jeton d'une requête en vol. Consommé au règlement, il ne peut servir qu'une fois.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    region: RegionId,
    seq: u64,
}

impl Ticket {
    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// Une requête plus récente a été émise : la réponse est ignorée.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionState {
    id: RegionId,
    phase: Phase,
    issued: u64,
}

impl RegionState {
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            phase: Phase::Idle,
            issued: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Entre en chargement, quel que soit l'état précédent.
    pub fn begin(&mut self, message: impl Into<String>) -> Ticket {
        self.issued += 1;
        let message = message.into();
        debug!(region = self.id.name(), seq = self.issued, label = %message, "chargement");
        self.phase = Phase::Loading(message);
        Ticket {
            region: self.id,
            seq: self.issued,
        }
    }

    pub fn settle(&mut self, ticket: Ticket, phase: Phase) -> Settlement {
        debug_assert_eq!(ticket.region, self.id);
        if ticket.seq != self.issued {
            warn!(
                region = self.id.name(),
                seq = ticket.seq,
                latest = self.issued,
                "réponse périmée ignorée"
            );
            return Settlement::Stale;
        }
        self.phase = phase;
        Settlement::Applied
    }
}

/// Les trois zones d'affichage, chacune indépendante des autres.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMap {
    regions: BTreeMap<RegionId, RegionState>,
}

impl Default for RegionMap {
    fn default() -> Self {
        Self {
            regions: RegionId::ALL
                .iter()
                .map(|&id| (id, RegionState::new(id)))
                .collect(),
        }
    }
}

impl RegionMap {
    pub fn get(&self, id: RegionId) -> &RegionState {
        &self.regions[&id]
    }

    pub fn get_mut(&mut self, id: RegionId) -> &mut RegionState {
        self.regions
            .entry(id)
            .or_insert_with(|| RegionState::new(id))
    }

    pub fn settle(&mut self, ticket: Ticket, phase: Phase) -> Settlement {
        self.get_mut(ticket.region).settle(ticket, phase)
    }
}
