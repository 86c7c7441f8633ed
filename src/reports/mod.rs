use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dualnback::evaluator::TurnFeedback;
use dualnback::recorder::ReactionTimes;
use dualnback::scorer::{Rating, ScoreResult};
use dualnback::sequence::Sequence;
use dualnback::simulation::BatchSummary;
use dualnback::stimulus::{Channel, GridCell};
use strum::IntoEnumIterator;

/// The 3x3 board with `lit` highlighted. The centre is never lit.
pub fn render_grid(lit: Option<GridCell>) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in 0..3u8 {
        let cells: Vec<Cell> = (0..3u8)
            .map(|col| {
                let on = lit.is_some_and(|c| c.row_col() == (row, col));
                let cell = if on {
                    Cell::new("■").fg(Color::Cyan).add_attribute(Attribute::Bold)
                } else if (row, col) == (1, 1) {
                    Cell::new("+")
                } else {
                    Cell::new(" ")
                };
                cell.set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    table
}

pub fn print_sequence_table(seq: &Sequence) {
    println!(
        "\n{}-back sequence, {} steps (V = visual match, A = auditory match)",
        seq.level(),
        seq.len()
    );

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Step").add_attribute(Attribute::Bold),
        Cell::new("Cell"),
        Cell::new("Row,Col"),
        Cell::new("Letter"),
        Cell::new("V").fg(Color::Cyan),
        Cell::new("A").fg(Color::Green),
    ]);

    for tick in 0..seq.len() {
        let Some(stim) = seq.stimulus(tick) else {
            continue;
        };
        let (row, col) = stim.visual_position.row_col();
        let marker = |channel: Channel| {
            if seq.is_match(channel, tick) {
                "*"
            } else {
                ""
            }
        };
        table.add_row(vec![
            Cell::new(tick).set_alignment(CellAlignment::Right),
            Cell::new(stim.visual_position.index()).set_alignment(CellAlignment::Right),
            Cell::new(format!("{},{}", row, col)),
            Cell::new(stim.auditory_letter),
            Cell::new(marker(Channel::Visual)).fg(Color::Cyan),
            Cell::new(marker(Channel::Auditory)).fg(Color::Green),
        ]);
    }
    println!("{}", table);
    println!(
        "Double matches at: {:?}",
        seq.double_matches()
    );
}

pub fn print_feedback(fb: &TurnFeedback) {
    let mark = |correct: bool| if correct { "✅" } else { "❌" };
    println!(
        "   Step {}: position {} | sound {}",
        fb.index,
        mark(fb.visual.correct()),
        mark(fb.auditory.correct())
    );
}

pub fn print_score_report(result: &ScoreResult, reactions: Option<&ReactionTimes>) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Channel").add_attribute(Attribute::Bold),
        Cell::new("Hits").fg(Color::Green),
        Cell::new("Misses").fg(Color::Yellow),
        Cell::new("Wrong").fg(Color::Red),
        Cell::new("Mean RT (ms)"),
    ]);
    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for channel in Channel::iter() {
        let t = result.channel(channel);
        let rt = reactions
            .and_then(|r| r.mean_ms(channel))
            .map_or_else(|| "-".to_string(), |ms| format!("{:.0}", ms));
        table.add_row(vec![
            Cell::new(channel).add_attribute(Attribute::Bold),
            Cell::new(t.hits),
            Cell::new(t.misses),
            Cell::new(t.wrong),
            Cell::new(rt),
        ]);
    }

    println!("\n=== 🧠 SESSION RESULT ===");
    println!("{}", table);
    println!(
        "Hit rate {:.3} | False alarm rate {:.3} | d' {:.3} ({}%)",
        result.hit_rate,
        result.false_alarm_rate,
        result.d_prime,
        result.percent()
    );
    println!("{}", result.rating().message());
}

pub fn print_simulation_summary(summary: &BatchSummary) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Sessions").add_attribute(Attribute::Bold),
        Cell::new("Mean d'").fg(Color::Cyan),
        Cell::new("Std Dev"),
        Cell::new("Min"),
        Cell::new("Max"),
    ]);
    table.add_row(vec![
        Cell::new(summary.sessions),
        Cell::new(format!("{:.3}", summary.mean_d_prime)).fg(Color::Cyan),
        Cell::new(format!("{:.3}", summary.std_dev)),
        Cell::new(format!("{:.3}", summary.min_d_prime)),
        Cell::new(format!("{:.3}", summary.max_d_prime)),
    ]);
    println!("\n=== 📊 SIMULATION SUMMARY ===");
    println!("{}", table);

    let mut ratings = Table::new();
    ratings.load_preset(ASCII_FULL);
    ratings.add_row(vec![
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Sessions"),
        Cell::new("Share"),
    ]);
    for rating in Rating::iter() {
        let count = summary.count(rating);
        let color = match rating {
            Rating::Excellent => Color::Green,
            Rating::Good => Color::Cyan,
            Rating::KeepPracticing => Color::Yellow,
        };
        ratings.add_row(vec![
            Cell::new(rating).fg(color),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(format!(
                "{:.1}%",
                100.0 * count as f64 / summary.sessions as f64
            ))
            .set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", ratings);
}
