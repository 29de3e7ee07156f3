use chrono::NaiveDate;
use clap::Args;
use noteprogress_core::streak::parse_day;
use noteprogress_core::today_local;

use crate::host::open_plugin;

#[derive(Args)]
pub struct TrackArgs {
    /// Day to record instead of today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,
    /// Print the resulting progress as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Print progress as JSON
    #[arg(long)]
    json: bool,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_day(s).map_err(|_| format!("'{s}' is not a YYYY-MM-DD date"))
}

pub fn run_track(args: TrackArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut plugin = open_plugin(args.json)?;
    let today = args.date.unwrap_or_else(today_local);
    let snapshot = plugin.track_note(today);
    plugin.ensure_saved()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

pub fn run_status(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut plugin = open_plugin(args.json)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(plugin.state())?);
    } else {
        plugin.status();
    }
    Ok(())
}
