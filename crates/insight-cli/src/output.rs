//! Table rendering for command output

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use insight_core::{CompanyResearch, ProductInsight, SearchHit, TrendReport, ValidatedSymbol};

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_resolution(company: &str, validated: &ValidatedSymbol) {
    let mut table = base_table();
    table.set_header(vec!["Company", "Symbol", "Exchange suffix"]);
    table.add_row(vec![
        company,
        &validated.symbol,
        validated.exchange_suffix.as_deref().unwrap_or("-"),
    ]);
    println!("{table}");
}

pub fn print_trend(report: &TrendReport) {
    let mut table = base_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Symbol".to_string(), report.symbol.clone()]);
    table.add_row(vec![
        "Period".to_string(),
        format!("{} year(s)", report.period_years),
    ]);
    table.add_row(vec![
        "Overall change".to_string(),
        format!("{:+.2}%", report.overall_change_percent),
    ]);
    table.add_row(vec![
        "Typical peak month".to_string(),
        report.typical_peak_month.clone(),
    ]);
    table.add_row(vec![
        "Typical dip month".to_string(),
        report.typical_dip_month.clone(),
    ]);
    table.add_row(vec![
        "Latest price".to_string(),
        format!("{:.2}", report.latest_price),
    ]);
    table.add_row(vec![
        "Data points".to_string(),
        report.data_point_count.to_string(),
    ]);
    println!("{table}");
}

pub fn print_insights(insights: &[ProductInsight]) {
    let mut table = base_table();
    table.set_header(vec!["Title", "Sentiment", "Score", "Similarity", "Summary"]);
    for insight in insights {
        table.add_row(vec![
            insight.title.clone(),
            insight.sentiment_label.to_string(),
            format!("{:+.2}", insight.sentiment_score),
            insight
                .similarity_score
                .map_or_else(|| "-".to_string(), |s| format!("{s:.2}")),
            insight.summary.clone(),
        ]);
    }
    println!("{table}");
}

pub fn print_hits(heading: &str, hits: &[SearchHit]) {
    println!("{heading}");
    if hits.is_empty() {
        println!("  (no results)");
        return;
    }

    let mut table = base_table();
    table.set_header(vec!["Title", "Link", "Snippet"]);
    for hit in hits {
        table.add_row(vec![
            hit.title.clone(),
            hit.link.clone(),
            hit.snippet.clone(),
        ]);
    }
    println!("{table}");
}

pub fn print_research(bundle: &CompanyResearch) {
    print_hits("Latest news", &bundle.news);
    print_hits("Products and services", &bundle.products);
    print_hits("Market research", &bundle.research);
    print_hits("Sales and revenue", &bundle.sales);
}
