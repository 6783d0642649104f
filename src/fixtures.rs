//! Golden-case fixtures shared by the integration tests and benches.
//!
//! Each case lives in its own directory holding a `case.yaml` with the syntax
//! tree and, for trees that should render, an `expected.py` with the exact
//! source they must produce.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::ast::Node;
use crate::writer::IndentStyle;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseClass {
    Renders,
    Rejects,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseSpec {
    pub class: CaseClass,
    pub tree: Node,
    #[serde(default)]
    pub style: IndentStyle,
    pub error_contains: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub dir: PathBuf,
    pub spec: CaseSpec,
}

impl Case {
    pub fn read_text(&self, relative_path: &str) -> Result<String> {
        fs::read_to_string(self.dir.join(relative_path))
            .with_context(|| format!("Reading {} fixture file {}", self.name, relative_path))
    }

    pub fn expected_source(&self) -> Result<String> {
        ensure!(
            self.spec.class == CaseClass::Renders,
            "Case {} is not expected to render",
            self.name
        );
        self.read_text("expected.py")
    }
}

/// Drops the trailing newline editors add to fixture files.
pub fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").trim_end().to_string()
}

pub fn load_cases(cases_dir: &Path) -> Result<Vec<Case>> {
    let mut cases = Vec::new();

    for entry in
        fs::read_dir(cases_dir).with_context(|| format!("Reading {}", cases_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let case_path = path.join("case.yaml");
        if !case_path.exists() {
            continue;
        }

        let case_name = path
            .file_name()
            .and_then(|value| value.to_str())
            .map(str::to_string)
            .with_context(|| format!("Invalid case directory name {}", path.display()))?;
        let case_raw = fs::read_to_string(&case_path)
            .with_context(|| format!("Reading {}", case_path.display()))?;
        let spec: CaseSpec = serde_yaml::from_str(&case_raw)
            .with_context(|| format!("Parsing {}", case_path.display()))?;

        if spec.class == CaseClass::Renders {
            ensure!(
                path.join("expected.py").exists(),
                "Missing expected.py for case {}",
                path.display()
            );
        }

        cases.push(Case {
            name: case_name,
            dir: path,
            spec,
        });
    }

    ensure!(
        !cases.is_empty(),
        "No test cases found in {}",
        cases_dir.display()
    );
    cases.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(cases)
}
