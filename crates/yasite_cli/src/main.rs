//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a store (file path argument, or in-memory) to verify `yasite_core`
//!   linkage and migrations.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;
use yasite_core::db::migrations::current_user_version;
use yasite_core::db::{open_db, open_db_in_memory};
use yasite_core::{home_feed, NewsRepository, SiteConfig, SqliteNewsRepository};

fn main() -> ExitCode {
    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("yasite_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let config = SiteConfig::default();
    let news = SqliteNewsRepository::try_new(&conn)?;
    let feed = home_feed(&news, &config)?;

    println!("yasite_core ping={}", yasite_core::ping());
    println!("yasite_core version={}", yasite_core::core_version());
    println!("yasite_core schema_version={}", current_user_version(&conn)?);
    println!(
        "yasite_core home_feed={}/{} news_total={}",
        feed.len(),
        config.news_count_on_home_page,
        news.count_news()?
    );
    Ok(())
}
