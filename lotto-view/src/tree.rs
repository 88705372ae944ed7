//! Arbre visuel produit par le rendu : une liste ordonnée de nœuds étiquetés,
//! sans aucune notion de style concret. Sérialisable pour les hôtes web.

use serde::Serialize;

use crate::classify::{BallToken, SumTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Loading,
    Success,
    Error,
}

/// Texte accompagné de sa bande de somme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedText {
    pub text: String,
    pub tag: SumTag,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Node {
    Placeholder {
        text: String,
    },
    Caption {
        text: String,
    },
    Notice {
        tone: Tone,
        text: String,
    },
    ResultRow {
        index: String,
        balls: Vec<BallToken>,
        info: TaggedText,
    },
    /// Enregistrement illisible, affiché tel quel.
    ErrorRow {
        raw: String,
    },
    TableHeader {
        columns: Vec<String>,
    },
    PredictionRow {
        rank: usize,
        sum: TaggedText,
        percent: String,
        /// Pourcentage de la piste, dans `[0, 100]`.
        bar_width: f64,
    },
}

impl Node {
    pub fn is_row(&self) -> bool {
        matches!(
            self,
            Node::ResultRow { .. } | Node::ErrorRow { .. } | Node::PredictionRow { .. }
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisualTree {
    pub nodes: Vec<Node>,
}

impl VisualTree {
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::Placeholder { text: text.into() }],
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.nodes.as_slice(), [Node::Placeholder { .. }])
    }

    pub fn rows(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_row())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
