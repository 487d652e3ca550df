use crate::{AirtableConfig, TxpixError};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

const API_BASE: &str = "https://api.airtable.com/v0";

/// A named passage of text pulled from a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    pub name: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct Record {
    id: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    records: Vec<Record>,
    /// Present while more pages of records remain
    offset: Option<String>,
}

/// Fetch every record of the configured table, following Airtable's `offset` paging,
/// and return the ones with a body sorted by name
pub fn fetch_text_files(config: &AirtableConfig) -> Result<Vec<TextFile>, TxpixError> {
    let url = format!("{API_BASE}/{}/{}", config.base_id, config.table_name);
    let client = reqwest::blocking::Client::new();

    let mut records = Vec::new();
    let mut offset: Option<String> = None;
    loop {
        debug!(%url, ?offset, "fetching records");
        let mut request = client.get(&url).bearer_auth(&config.api_key);
        if let Some(offset) = &offset {
            request = request.query(&[("offset", offset)]);
        }
        let page: ListResponse = request.send()?.error_for_status()?.json()?;
        records.extend(page.records);

        match page.offset {
            Some(next) => offset = Some(next),
            None => break,
        }
    }

    Ok(collect_text_files(records, &config.name_id, &config.body_id))
}

/// Records without a body field (or with a null one) are skipped. A record without a
/// name is named after its id.
fn collect_text_files(records: Vec<Record>, name_id: &str, body_id: &str) -> Vec<TextFile> {
    let mut files: Vec<TextFile> = records
        .into_iter()
        .filter_map(|record| {
            let body = record.fields.get(body_id).filter(|v| !v.is_null())?;
            let name = match record.fields.get(name_id).filter(|v| !v.is_null()) {
                Some(name) => field_text(name),
                None => record.id.clone(),
            };
            Some(TextFile {
                name,
                body: field_text(body),
            })
        })
        .collect();

    files.sort_by(|a, b| a.name.cmp(&b.name));
    files
}

/// Strings are used verbatim; anything else (numbers, lists, ...) as its JSON text
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
