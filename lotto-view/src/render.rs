use lotto_engine::PredictionItem;

use crate::classify::{ball_token, sum_tag};
use crate::record::{ParsedRecord, RecordIndex, ResultRecord};
use crate::tree::{Node, TaggedText, Tone, VisualTree};

pub const EMPTY_RESULTS: &str = "Aucun résultat ne correspond aux critères.";
pub const EMPTY_PREDICTIONS: &str = "Aucune prédiction disponible.";
pub const PREDICTION_COLUMNS: [&str; 4] = ["Rang", "Somme prédite", "Probabilité", "Poids"];

/// Échelle fixe de la barre : les probabilités usuelles sont petites.
const BAR_SCALE: f64 = 800.0;

/// `1234567` -> `1,234,567`. Attend des chiffres ASCII.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn index_label(index: &RecordIndex) -> String {
    match index {
        RecordIndex::Numeric(digits) => format!("#{}", group_thousands(digits)),
        RecordIndex::Raw(raw) => format!("#{}", raw),
    }
}

pub fn bar_width(probability: f64) -> f64 {
    let width = probability * BAR_SCALE;
    if width.is_nan() { 0.0 } else { width.clamp(0.0, 100.0) }
}

pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn format_elapsed(elapsed_ms: f64) -> String {
    format!("Terminé ({:.2} ms)", elapsed_ms)
}

fn result_row(record: &ResultRecord) -> Node {
    Node::ResultRow {
        index: index_label(&record.index),
        balls: record.numbers.iter().filter_map(|n| ball_token(n)).collect(),
        info: TaggedText {
            text: record.info_text.clone(),
            tag: sum_tag(record.derived_sum.unwrap_or(0)),
        },
    }
}

pub fn render_result_list(
    records: &[ParsedRecord],
    elapsed_ms: Option<f64>,
    header: Option<&str>,
) -> VisualTree {
    if records.is_empty() {
        return VisualTree::placeholder(EMPTY_RESULTS);
    }

    let mut tree = VisualTree::default();
    if let Some(text) = header {
        tree.push(Node::Caption {
            text: text.to_string(),
        });
    }
    if let Some(ms) = elapsed_ms {
        tree.push(Node::Notice {
            tone: Tone::Success,
            text: format_elapsed(ms),
        });
    }

    for parsed in records {
        let node = match parsed {
            ParsedRecord::Record(record) => result_row(record),
            ParsedRecord::Failure(failure) => Node::ErrorRow {
                raw: failure.raw.clone(),
            },
        };
        tree.push(node);
    }
    tree
}

/// Le rang est la position dans la liste du moteur ; aucun tri n'est refait ici.
pub fn render_prediction_table(entries: &[PredictionItem]) -> VisualTree {
    if entries.is_empty() {
        return VisualTree::placeholder(EMPTY_PREDICTIONS);
    }

    let mut tree = VisualTree::default();
    tree.push(Node::TableHeader {
        columns: PREDICTION_COLUMNS.iter().map(|c| c.to_string()).collect(),
    });
    for (i, entry) in entries.iter().enumerate() {
        tree.push(Node::PredictionRow {
            rank: i + 1,
            sum: TaggedText {
                text: entry.sum.to_string(),
                tag: sum_tag(entry.sum),
            },
            percent: format_percent(entry.probability),
            bar_width: bar_width(entry.probability),
        });
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{BallBand, SumTag};
    use crate::record::{ParseFailure, parse_batch};

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("8145059"), "8,145,059");
        assert_eq!(group_thousands("123456789012"), "123,456,789,012");
    }

    #[test]
    fn test_index_label() {
        assert_eq!(index_label(&RecordIndex::Numeric("1234".into())), "#1,234");
        assert_eq!(index_label(&RecordIndex::Raw("abc".into())), "#abc");
    }

    #[test]
    fn test_empty_results_ignore_header_and_elapsed() {
        let tree = render_result_list(&[], Some(12.5), Some("Condition"));
        assert_eq!(tree, VisualTree::placeholder(EMPTY_RESULTS));
    }

    #[test]
    fn test_result_row_tokens() {
        let records = parse_batch(&["#1: [1, 12, 23, 34, 45, x] (합계 21)"]);
        let tree = render_result_list(&records, None, None);
        assert_eq!(tree.nodes.len(), 1);
        match &tree.nodes[0] {
            Node::ResultRow { index, balls, info } => {
                assert_eq!(index, "#1");
                let bands: Vec<_> = balls.iter().map(|b| b.band).collect();
                assert_eq!(
                    bands,
                    vec![
                        BallBand::Yellow,
                        BallBand::Blue,
                        BallBand::Red,
                        BallBand::Green,
                        BallBand::GrayGreen,
                    ]
                );
                assert_eq!(info.text, "합계 21");
                assert_eq!(info.tag, SumTag::Low);
            }
            other => panic!("nœud inattendu : {:?}", other),
        }
    }

    #[test]
    fn test_missing_sum_tags_as_zero() {
        let records = parse_batch(&["#1: [44, 45] (inconnu)"]);
        let tree = render_result_list(&records, None, None);
        match &tree.nodes[0] {
            Node::ResultRow { info, .. } => assert_eq!(info.tag, SumTag::Low),
            other => panic!("nœud inattendu : {:?}", other),
        }
    }

    #[test]
    fn test_oversized_sum_tags_very_high() {
        let records = parse_batch(&["#1: [45] (합계 99999999999999999999)"]);
        assert_eq!(records[0].as_record().unwrap().derived_sum, Some(i64::MAX));
        let tree = render_result_list(&records, None, None);
        match &tree.nodes[0] {
            Node::ResultRow { info, .. } => assert_eq!(info.tag, SumTag::VeryHigh),
            other => panic!("nœud inattendu : {:?}", other),
        }
    }

    #[test]
    fn test_failures_inline_and_order_kept() {
        let records = vec![
            ParsedRecord::Failure(ParseFailure {
                raw: "cassé".into(),
            }),
            parse_batch(&["#2: [2] (합계 170)"]).remove(0),
        ];
        let tree = render_result_list(&records, Some(1.234), Some("Condition : somme 100~200"));
        assert_eq!(tree.nodes.len(), 4);
        let caption = Node::Caption {
            text: "Condition : somme 100~200".into(),
        };
        let notice = Node::Notice {
            tone: Tone::Success,
            text: "Terminé (1.23 ms)".into(),
        };
        let error = Node::ErrorRow {
            raw: "cassé".into(),
        };
        assert_eq!(tree.nodes[..3], [caption, notice, error]);
        assert!(matches!(
            &tree.nodes[3],
            Node::ResultRow { info, .. } if info.tag == SumTag::High
        ));
    }

    #[test]
    fn test_bar_width_clamped() {
        assert_eq!(bar_width(0.0), 0.0);
        assert!((bar_width(0.05) - 40.0).abs() < 1e-9);
        assert_eq!(bar_width(0.125), 100.0);
        assert_eq!(bar_width(1.0), 100.0);
        assert_eq!(bar_width(-0.5), 0.0);
        assert_eq!(bar_width(f64::NAN), 0.0);
        assert_eq!(bar_width(f64::INFINITY), 100.0);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0425), "4.25%");
        assert_eq!(format_percent(1.0), "100.00%");
    }

    #[test]
    fn test_prediction_table_keeps_engine_order() {
        let entries = vec![
            PredictionItem::new(190, 0.01),
            PredictionItem::new(100, 0.09),
            PredictionItem::new(150, 0.05),
        ];
        let tree = render_prediction_table(&entries);
        assert!(matches!(&tree.nodes[0], Node::TableHeader { columns } if columns.len() == 4));
        let ranks: Vec<(usize, String, SumTag)> = tree
            .rows()
            .map(|n| match n {
                Node::PredictionRow { rank, sum, .. } => (*rank, sum.text.clone(), sum.tag),
                other => panic!("nœud inattendu : {:?}", other),
            })
            .collect();
        assert_eq!(
            ranks,
            vec![
                (1, "190".to_string(), SumTag::VeryHigh),
                (2, "100".to_string(), SumTag::Low),
                (3, "150".to_string(), SumTag::Mid),
            ]
        );
    }

    #[test]
    fn test_prediction_table_empty() {
        assert_eq!(render_prediction_table(&[]), VisualTree::placeholder(EMPTY_PREDICTIONS));
    }
}
