use clap::Subcommand;
use noteprogress_core::SettingField;
use serde::Serialize;

use crate::host::open_plugin;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print one counter (streakCount or badgeCount)
    Get {
        /// Setting name
        field: String,
    },
    /// Overwrite a counter
    Set {
        /// Setting name
        field: String,
        /// New value (non-negative integer)
        value: String,
    },
    /// List editable settings with their current values
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SettingRow {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    value: u32,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SettingsAction::Get { field } => {
            let plugin = open_plugin(false)?;
            let field = SettingField::parse(&field)?;
            println!("{}", field.value(plugin.state()));
        }
        SettingsAction::Set { field, value } => {
            let mut plugin = open_plugin(false)?;
            plugin.edit_setting(&field, &value)?;
            plugin.ensure_saved()?;
            println!("ok");
        }
        SettingsAction::List { json } => {
            let plugin = open_plugin(json)?;
            let rows: Vec<SettingRow> = SettingField::ALL
                .iter()
                .map(|field| SettingRow {
                    key: field.key(),
                    name: field.name(),
                    description: field.description(),
                    value: field.value(plugin.state()),
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("🎯 Note Progress Tracker Settings");
                for row in rows {
                    println!("{} ({}): {}\n    {}", row.name, row.key, row.value, row.description);
                }
            }
        }
    }
    Ok(())
}
