use std::collections::HashSet;

use clap::Parser;

mod github;
mod report;
mod settings;
mod window;

use crate::github::Client;
use crate::settings::Settings;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Weekly GitHub activity digest")]
struct Cli {
    #[arg(
        long,
        value_name = "FILE",
        default_value = "settings.yaml",
        help = "Path to the settings file"
    )]
    settings: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(&cli.settings)?;
    let client = Client::new()?;

    let (start, end) = window::resolve_window(&settings, chrono::Local::now())?;

    println!("start {}", window::format_timestamp(&start));
    println!("end {}", window::format_timestamp(&end));
    println!();

    let query = github::build_search_query(&settings.author, &start, &end);
    let results = github::fetch_search_results(client.octocrab(), &query).await?;

    let ignore_orgs: HashSet<String> = settings.ignore_organizations.iter().cloned().collect();
    let items = report::filter_items(
        results.items,
        &ignore_orgs,
        start.with_timezone(&chrono::Utc),
        end.with_timezone(&chrono::Utc),
    );

    println!("{}", report::render_digest(&items));

    Ok(())
}
