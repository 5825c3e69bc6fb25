use super::catalog::Industry;
use indexmap::IndexMap;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read answers: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid answer JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("industry '{0}' is not offered")]
    UnknownIndustry(String),
}

/// Answers gathered outside the wizard, e.g. from a file or a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerImport {
    #[serde(default)]
    pub startup_name: Option<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub answers: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: String,
    #[serde(default)]
    answer: String,
}

impl AnswerImport {
    /// Reads `.csv` files as rows, everything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        let file = std::fs::File::open(path)?;
        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Ok(serde_json::from_reader(file)?)
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Expects a `question_id,answer` header; later rows override earlier ones.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
        let mut answers = IndexMap::new();
        for row in csv_reader.deserialize::<AnswerRow>() {
            let row = row?;
            answers.insert(row.question_id.trim().to_string(), row.answer);
        }
        Ok(Self {
            startup_name: None,
            industries: Vec::new(),
            answers,
        })
    }

    pub fn parsed_industries(&self) -> Result<Vec<Industry>, ImportError> {
        self.industries
            .iter()
            .map(|raw| Industry::parse(raw).ok_or_else(|| ImportError::UnknownIndustry(raw.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_keep_file_order() {
        let data = "question_id,answer\nq2,\"Grow fast, stay lean\"\nq1,We build tools\n";
        let import = AnswerImport::from_csv_reader(data.as_bytes()).expect("csv parses");
        let ids: Vec<&str> = import.answers.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["q2", "q1"]);
        assert_eq!(import.answers["q2"], "Grow fast, stay lean");
    }

    #[test]
    fn json_accepts_camel_case_fields() {
        let raw = r#"{"startupName":"Acme","industries":["SaaS / B2B","fintech"],"answers":{"q1":"Tools"}}"#;
        let import = AnswerImport::from_json_str(raw).expect("json parses");
        assert_eq!(import.startup_name.as_deref(), Some("Acme"));
        assert_eq!(
            import.parsed_industries().expect("industries resolve"),
            vec![Industry::SaasB2b, Industry::Fintech]
        );
    }

    #[test]
    fn unknown_industry_is_reported() {
        let import = AnswerImport {
            industries: vec!["Space Mining".to_string()],
            ..AnswerImport::default()
        };
        let err = import.parsed_industries().unwrap_err();
        assert!(matches!(err, ImportError::UnknownIndustry(name) if name == "Space Mining"));
    }
}
