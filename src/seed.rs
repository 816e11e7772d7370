//! Seed data: the names and reporting lines an organization starts from.
//!
//! Seeds are plain TOML:
//!
//! ```toml
//! root = "Ada Lovelace"
//! employees = ["Grace Hopper", "Alan Turing"]
//!
//! [[edges]]
//! supervisor = "Ada Lovelace"
//! employee = "Grace Hopper"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid seed at {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Everything needed to bootstrap an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Seed {
    /// Name of the root employee.
    pub root: String,

    /// Other employees, in registration order.
    #[serde(default)]
    pub employees: Vec<String>,

    /// Reporting lines, wired in order.
    #[serde(default)]
    pub edges: Vec<SeedEdge>,
}

/// One reporting line, by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SeedEdge {
    pub supervisor: String,
    pub employee: String,
}

impl Seed {
    /// Reads a seed from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let contents = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| SeedError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The fifteen-person demo organization.
    pub fn demo() -> Self {
        const ROOT: &str = "Mark Zuckerberg";
        const EMPLOYEES: [&str; 14] = [
            "Sarah Donald",
            "Tyler Simpson",
            "Bruce Willis",
            "Georgina Flangy",
            "Cassandra Reynolds",
            "Mary Blue",
            "Tina Teff",
            "Will Turner",
            "Harry Tobs",
            "Thomas Brown",
            "George Carrey",
            "Gary Styles",
            "Sophie Turner",
            "Bob Saget",
        ];
        const EDGES: [(&str, &str); 14] = [
            (ROOT, "Sarah Donald"),
            (ROOT, "Tyler Simpson"),
            (ROOT, "Bruce Willis"),
            (ROOT, "Georgina Flangy"),
            ("Sarah Donald", "Cassandra Reynolds"),
            ("Cassandra Reynolds", "Mary Blue"),
            ("Cassandra Reynolds", "Bob Saget"),
            ("Bob Saget", "Tina Teff"),
            ("Tina Teff", "Will Turner"),
            ("Tyler Simpson", "Harry Tobs"),
            ("Tyler Simpson", "George Carrey"),
            ("Tyler Simpson", "Gary Styles"),
            ("Harry Tobs", "Thomas Brown"),
            ("Georgina Flangy", "Sophie Turner"),
        ];

        Self {
            root: ROOT.to_string(),
            employees: EMPLOYEES.iter().map(ToString::to_string).collect(),
            edges: EDGES
                .iter()
                .map(|(supervisor, employee)| SeedEdge {
                    supervisor: (*supervisor).to_string(),
                    employee: (*employee).to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    const SAMPLE: &str = r#"
root = "Ada"
employees = ["Grace", "Alan"]

[[edges]]
supervisor = "Ada"
employee = "Grace"

[[edges]]
supervisor = "Grace"
employee = "Alan"
"#;

    #[test]
    fn load_parses_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.toml");
        fs::write(&path, SAMPLE).unwrap();

        let seed = Seed::load(&path).unwrap();
        assert_eq!(seed.root, "Ada");
        assert_eq!(seed.employees, vec!["Grace", "Alan"]);
        assert_eq!(
            seed.edges[1],
            SeedEdge {
                supervisor: "Grace".into(),
                employee: "Alan".into(),
            }
        );
    }

    #[test]
    fn root_only_seed_is_valid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.toml");
        fs::write(&path, "root = \"Solo\"\n").unwrap();

        let seed = Seed::load(&path).unwrap();
        assert!(seed.employees.is_empty());
        assert!(seed.edges.is_empty());
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Seed::load(&dir.path().join("absent.toml")).unwrap_err();

        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[test]
    fn load_invalid_toml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.toml");
        fs::write(&path, "employees = [\"no root\"]\n").unwrap();

        let err = Seed::load(&path).unwrap_err();
        assert!(matches!(err, SeedError::Toml { .. }));
        assert!(err.to_string().contains("seed.toml"));
    }

    #[test]
    fn demo_seed_has_fifteen_people() {
        let seed = Seed::demo();

        assert_eq!(seed.root, "Mark Zuckerberg");
        assert_eq!(seed.employees.len(), 14);
        assert_eq!(seed.edges.len(), 14);
    }
}
