//! Database reference detection: connection strings in configuration files,
//! `FROM` clauses in SQL files.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use revmap_core::{DatabaseDependency, FileRecord};

static CONNECTION_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)connectionstring\s*=\s*"([^"]+)""#).unwrap());

static DATABASE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bDatabase\s*=\s*([^;]+)").unwrap());
static INITIAL_CATALOG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bInitial Catalog\s*=\s*([^;]+)").unwrap());
static DATA_SOURCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bData Source\s*=\s*([^;]+)").unwrap());

static FROM_CLAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bFROM\s+\[?([A-Za-z_][A-Za-z0-9_.]*)\]?").unwrap());

fn database_name_from_connection_string(connection_string: &str) -> Option<String> {
    DATABASE_NAME
        .captures(connection_string)
        .or_else(|| INITIAL_CATALOG.captures(connection_string))
        .or_else(|| DATA_SOURCE.captures(connection_string))
        .map(|c| c[1].trim().trim_matches(|ch| ch == '"' || ch == '\'').to_string())
}

pub fn from_connection_strings(config_files: &[FileRecord]) -> Vec<DatabaseDependency> {
    let mut by_name: HashMap<String, DatabaseDependency> = HashMap::new();
    for file in config_files {
        let Ok(content) = std::fs::read_to_string(&file.absolute_path) else { continue };
        for captures in CONNECTION_STRING.captures_iter(&content) {
            let connection_string = captures[1].to_string();
            let Some(name) = database_name_from_connection_string(&connection_string) else { continue };
            let entry = by_name.entry(name.clone()).or_insert_with(|| DatabaseDependency {
                database_name: name,
                ..Default::default()
            });
            entry.connection_string = Some(connection_string);
        }
    }
    by_name.into_values().collect()
}

pub fn from_sql_files(sql_files: &[FileRecord]) -> Vec<String> {
    let mut tables = std::collections::HashSet::new();
    for file in sql_files {
        let Ok(content) = std::fs::read_to_string(&file.absolute_path) else { continue };
        for captures in FROM_CLAUSE.captures_iter(&content) {
            tables.insert(captures[1].to_string());
        }
    }
    let mut tables: Vec<String> = tables.into_iter().collect();
    tables.sort();
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_database_name_priority_order() {
        assert_eq!(database_name_from_connection_string("Initial Catalog=Orders;Data Source=srv"), Some("Orders".to_string()));
        assert_eq!(database_name_from_connection_string("Data Source=srv;Database=Orders"), Some("Orders".to_string()));
        assert_eq!(database_name_from_connection_string("Data Source=srv"), Some("srv".to_string()));
    }

    #[test]
    fn extracts_table_names_from_from_clauses() {
        let tables = FROM_CLAUSE.captures_iter("SELECT * FROM Customers c JOIN FROM Orders o").map(|c| c[1].to_string()).collect::<Vec<_>>();
        assert!(tables.contains(&"Customers".to_string()));
        assert!(tables.contains(&"Orders".to_string()));
    }
}
