use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use timetally_core::{format_hms, Project, Summary};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Project")]
    name: String,
    #[tabled(rename = "Time")]
    time: String,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Key")]
    hotkey: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn show_summary(title: &str, summary: &Summary) {
    println!("\x1b[1;36m{}\x1b[0m", title);
    if summary.is_empty() {
        println!("No time recorded.");
        return;
    }

    let mut rows: Vec<SummaryRow> = summary
        .iter()
        .map(|(name, secs)| SummaryRow {
            name: name.to_string(),
            time: format_hms(secs),
        })
        .collect();
    rows.push(SummaryRow {
        name: "Total".to_string(),
        time: format_hms(summary.total()),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN))
        .with(Modify::new(Rows::last()).with(Color::BOLD));
    println!("{}", table);
}

pub fn show_projects(projects: &[&Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }

    let rows = projects.iter().map(|p| ProjectRow {
        hotkey: p.hotkey.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string()),
        name: p.name.clone(),
        id: p.id.to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}
