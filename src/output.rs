//! Table and JSON output formatting.

use serde::Serialize;
use tabled::builder::Builder;
use tabled::{Table, Tabled};

use erp_auth::AccessGate;
use erp_core::result::AppResult;
use erp_entity::{AccessLevel, UserRole, ViewId};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of rows as a table.
pub fn print_list<T: Tabled>(items: &[T]) {
    if items.is_empty() {
        println!("No results found.");
    } else {
        println!("{}", Table::new(items));
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Table => println!("{:#?}", item),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
    }
    Ok(())
}

/// Print the role-to-view access matrix.
pub fn print_policy(gate: &AccessGate, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(
                std::iter::once("role".to_string())
                    .chain(ViewId::ROUTABLE.iter().map(ViewId::to_string)),
            );
            for role in UserRole::ALL {
                builder.push_record(
                    std::iter::once(role.to_string()).chain(
                        ViewId::ROUTABLE
                            .iter()
                            .map(|view| level_cell(gate.access_level(role, *view)).to_string()),
                    ),
                );
            }
            println!("{}", builder.build());
        }
        OutputFormat::Json => {
            let matrix: serde_json::Map<String, serde_json::Value> = UserRole::ALL
                .iter()
                .map(|role| {
                    let views: serde_json::Map<String, serde_json::Value> = ViewId::ROUTABLE
                        .iter()
                        .filter_map(|view| {
                            gate.access_level(*role, *view)
                                .map(|level| (view.to_string(), serde_json::json!(level)))
                        })
                        .collect();
                    (role.to_string(), serde_json::Value::Object(views))
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&matrix)?);
        }
    }
    Ok(())
}

fn level_cell(level: Option<AccessLevel>) -> &'static str {
    match level {
        Some(AccessLevel::ReadWrite) => "read-write",
        Some(AccessLevel::ReadOnly) => "read-only",
        None => "-",
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    println!("✗ {}", msg);
}
