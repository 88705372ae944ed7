use crate::config::ViewConfig;
use crate::error::ValidationError;

pub fn parse_int(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

fn at_least(field: &'static str, value: i64, min: i64) -> Result<i64, ValidationError> {
    if value < min {
        return Err(ValidationError::TooSmall { field, value, min });
    }
    Ok(value)
}

fn to_u32(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::TooLarge {
        field,
        value,
        max: u32::MAX as i64,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SumModeKind {
    #[default]
    Range,
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumMode {
    Range { min: i64, max: i64 },
    Exact(i64),
}

impl SumMode {
    /// Bornes envoyées au moteur : une plage inversée est permutée, une valeur
    /// exacte devient `(v, v)`.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            SumMode::Range { min, max } if min > max => (max, min),
            SumMode::Range { min, max } => (min, max),
            SumMode::Exact(value) => (value, value),
        }
    }
}

/// Sélecteur exclusif plage / valeur exacte : un seul groupe de saisie visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SumModeToggle {
    active: SumModeKind,
}

impl SumModeToggle {
    pub fn select(&mut self, kind: SumModeKind) {
        self.active = kind;
    }

    pub fn active(&self) -> SumModeKind {
        self.active
    }

    pub fn is_visible(&self, group: SumModeKind) -> bool {
        self.active == group
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SumInputs {
    pub min: String,
    pub max: String,
    pub target: String,
}

impl SumInputs {
    pub fn range(min: &str, max: &str) -> Self {
        Self {
            min: min.to_string(),
            max: max.to_string(),
            ..Default::default()
        }
    }

    pub fn exact(target: &str) -> Self {
        Self {
            target: target.to_string(),
            ..Default::default()
        }
    }

    /// Seul le groupe du mode actif est lu.
    pub fn read(&self, kind: SumModeKind) -> Result<SumMode, ValidationError> {
        match kind {
            SumModeKind::Range => Ok(SumMode::Range {
                min: parse_int("somme minimale", &self.min)?,
                max: parse_int("somme maximale", &self.max)?,
            }),
            SumModeKind::Exact => Ok(SumMode::Exact(parse_int("somme cible", &self.target)?)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkovQuery {
    pub current_sum: i64,
    pub window: i64,
    pub top_n: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkovInputs {
    pub current_sum: String,
    pub window: String,
    pub top_n: String,
}

impl MarkovInputs {
    pub fn new(current_sum: &str, window: &str, top_n: &str) -> Self {
        Self {
            current_sum: current_sum.to_string(),
            window: window.to_string(),
            top_n: top_n.to_string(),
        }
    }

    /// Fenêtre et top N pré-remplis depuis la configuration.
    pub fn prefilled(config: &ViewConfig) -> Self {
        Self {
            current_sum: String::new(),
            window: config.default_window.to_string(),
            top_n: config.default_top_n.to_string(),
        }
    }

    pub fn read(&self) -> Result<MarkovQuery, ValidationError> {
        let current_sum = parse_int("somme actuelle", &self.current_sum)?;
        let window = at_least("fenêtre", parse_int("fenêtre", &self.window)?, 0)?;
        let top_n = at_least("top N", parse_int("top N", &self.top_n)?, 1)?;
        Ok(MarkovQuery {
            current_sum,
            window,
            top_n: to_u32("top N", top_n)?,
        })
    }
}

/// Nombre de tirages aléatoires demandés.
pub fn read_pick_count(raw: &str) -> Result<u32, ValidationError> {
    let count = at_least("nombre de tirages", parse_int("nombre de tirages", raw)?, 1)?;
    to_u32("nombre de tirages", count)
}
