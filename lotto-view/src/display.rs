use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use crate::classify::{BallBand, SumTag};
use crate::orchestrator::StatusLine;
use crate::region::Phase;
use crate::tree::{Node, Tone, VisualTree};

const BAR_CELLS: f64 = 30.0;

pub fn ball_color(band: BallBand) -> Color {
    match band {
        BallBand::Yellow => Color::Yellow,
        BallBand::Blue => Color::Blue,
        BallBand::Red => Color::Red,
        BallBand::Green => Color::Green,
        BallBand::GrayGreen => Color::DarkGreen,
    }
}

pub fn tag_color(tag: SumTag) -> Color {
    match tag {
        SumTag::Low => Color::Green,
        SumTag::Mid => Color::Cyan,
        SumTag::High => Color::Yellow,
        SumTag::VeryHigh => Color::Red,
    }
}

fn tone_prefix(tone: Tone) -> &'static str {
    match tone {
        Tone::Loading => "⏳",
        Tone::Success => "✅",
        Tone::Error => "❌",
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn bar(width: f64) -> String {
    "█".repeat((width / 100.0 * BAR_CELLS).round() as usize)
}

/// Texte multi-ligne d'un arbre : légendes et messages, puis les lignes en tableau.
pub fn render_tree(tree: &VisualTree) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut table: Option<Table> = None;

    for node in &tree.nodes {
        match node {
            Node::Placeholder { text } | Node::Caption { text } => lines.push(text.clone()),
            Node::Notice { tone, text } => lines.push(format!("{} {}", tone_prefix(*tone), text)),
            Node::TableHeader { columns } => {
                table.get_or_insert_with(new_table).set_header(columns);
            }
            Node::ResultRow { index, balls, info } => {
                let mut row = vec![Cell::new(index)];
                row.extend(
                    balls
                        .iter()
                        .map(|b| Cell::new(format!("{:2}", b.value)).fg(ball_color(b.band))),
                );
                row.push(Cell::new(&info.text).fg(tag_color(info.tag)));
                table.get_or_insert_with(new_table).add_row(row);
            }
            Node::ErrorRow { raw } => {
                table
                    .get_or_insert_with(new_table)
                    .add_row(vec![Cell::new(format!("ERREUR D'ANALYSE : {}", raw)).fg(Color::Red)]);
            }
            Node::PredictionRow { rank, sum, percent, bar_width } => {
                table.get_or_insert_with(new_table).add_row(vec![
                    Cell::new(rank),
                    Cell::new(&sum.text).fg(tag_color(sum.tag)),
                    Cell::new(percent),
                    Cell::new(bar(*bar_width)).fg(Color::Green),
                ]);
            }
        }
    }

    if let Some(table) = table {
        lines.push(table.to_string());
    }
    lines.join("\n")
}

pub fn render_phase(phase: &Phase) -> String {
    match phase {
        Phase::Idle => String::new(),
        Phase::Loading(message) => format!("{} {}", tone_prefix(Tone::Loading), message),
        Phase::Success { tree, .. } => render_tree(tree),
        Phase::Error(message) => format!("{} Erreur : {}", tone_prefix(Tone::Error), message),
    }
}

pub fn render_status(status: &StatusLine) -> String {
    format!("{} {}", tone_prefix(status.tone), status.text)
}
