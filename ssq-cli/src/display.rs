use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::import::ImportResult;
use ssq_analysis::{GapAnalysis, HotCold, NumberFrequency, PredictionResult};
use ssq_db::models::DrawRecord;

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ")
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_draws(draws: &[DrawRecord]) {
    if draws.is_empty() {
        println!("No draw to display.");
        return;
    }

    let mut table = new_table(vec!["Issue", "Date", "Week", "Front", "Back", "Sales", "Prize pool"]);

    for draw in draws {
        let money = |amount: i64| {
            if amount > 0 {
                amount.to_string()
            } else {
                "—".to_string()
            }
        };
        table.add_row(vec![
            Cell::new(&draw.issue),
            Cell::new(&draw.open_time),
            Cell::new(&draw.week),
            Cell::new(join_numbers(&draw.sorted_front())).fg(Color::Red),
            Cell::new(format!("{:02}", draw.back)).fg(Color::Blue),
            Cell::new(money(draw.sale_money)),
            Cell::new(money(draw.prize_pool_money)),
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import finished:");
    println!("  Records read       : {}", result.total_records);
    println!("  Inserted           : {}", result.inserted);
    println!("  Duplicates ignored : {}", result.skipped);
    if result.errors > 0 {
        println!("  Errors             : {}", result.errors);
    }
}

fn display_frequency_table(freqs: &[NumberFrequency]) {
    let mut table = new_table(vec!["Number", "Count", "Share"]);
    for f in freqs {
        table.add_row(vec![
            format!("{:02}", f.number),
            f.count.to_string(),
            format!("{:.2}%", f.percentage),
        ]);
    }
    println!("{table}");
}

pub fn display_frequencies(front: &[NumberFrequency], back: &[NumberFrequency], total: usize) {
    println!("\n📊 Frequencies over {} draws\n", total);

    println!("── Front (1-33) ──");
    display_frequency_table(front);

    println!("\n── Back (1-16) ──");
    display_frequency_table(back);
}

pub fn display_hot_cold(title: &str, numbers: &HotCold, color: Color) {
    println!("\n{title}\n");
    let mut table = new_table(vec!["Pool", "Numbers"]);
    table.add_row(vec![
        Cell::new("Front"),
        Cell::new(join_numbers(&numbers.front)).fg(color),
    ]);
    table.add_row(vec![
        Cell::new("Back"),
        Cell::new(join_numbers(&numbers.back)).fg(color),
    ]);
    println!("{table}");
}

pub fn display_gaps(gaps: &GapAnalysis) {
    println!("\n📏 Gaps between sorted front numbers\n");
    let mut table = new_table(vec!["Measure", "Value"]);
    table.add_row(vec!["Gaps counted".to_string(), gaps.gaps.len().to_string()]);
    table.add_row(vec!["Average gap".to_string(), format!("{:.3}", gaps.avg_gap)]);
    table.add_row(vec!["Most common".to_string(), join_numbers(&gaps.common_gaps)]);
    println!("{table}");
}

pub fn display_predictions(issue: &str, predictions: &[PredictionResult]) {
    println!("\n🎯 Prediction for issue {issue}\n");

    let mut table = new_table(vec!["#", "Front", "Back", "Confidence"]);
    for (i, p) in predictions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(join_numbers(&p.front)).fg(Color::Red),
            Cell::new(format!("{:02}", p.back)).fg(Color::Blue),
            Cell::new(format!("{:.0}%", p.confidence * 100.0)),
        ]);
    }
    println!("{table}");

    if let Some(first) = predictions.first() {
        println!("Method  : {}", first.method);
        println!("Analysis: {}", first.analysis);
    }
    println!("\nThis is a heuristic, not a forecast: every combination is equally likely.");
}
