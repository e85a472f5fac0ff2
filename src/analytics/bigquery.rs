//! BigQuery REST client (`jobs.query`).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    analytics::{AnalyticsClient, AnalyticsQuery, AnalyticsRow, ParameterValue, QueryParameter},
    config::AnalyticsConfig,
    error::analytics::AnalyticsError,
};

/// Runs synchronous queries through `POST {api_url}/projects/{project}/queries`.
#[derive(Clone, Debug)]
pub struct BigQueryClient {
    http: Client,
    api_url: String,
    project_id: String,
    access_token: Option<String>,
}

impl BigQueryClient {
    /// Builds a client with the configured timeout.
    ///
    /// # Arguments
    /// - `config` - Analytical store settings
    ///
    /// # Returns
    /// - `Ok(BigQueryClient)` - Client ready to issue queries
    /// - `Err(AnalyticsError::RequestError)` - The HTTP client could not be built
    pub fn new(config: &AnalyticsConfig) -> Result<Self, AnalyticsError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn queries_url(&self) -> String {
        format!("{}/projects/{}/queries", self.api_url, self.project_id)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    query: &'a str,
    use_legacy_sql: bool,
    parameter_mode: &'static str,
    query_parameters: Vec<RequestParameter<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestParameter<'a> {
    name: &'a str,
    parameter_type: ParameterType,
    parameter_value: RequestValue,
}

#[derive(Serialize)]
struct ParameterType {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct RequestValue {
    value: String,
}

impl<'a> From<&'a QueryParameter> for RequestParameter<'a> {
    fn from(param: &'a QueryParameter) -> Self {
        // INT64 values travel as decimal strings
        let (kind, value) = match &param.value {
            ParameterValue::Int64(value) => ("INT64", value.to_string()),
            ParameterValue::String(value) => ("STRING", value.clone()),
        };

        Self {
            name: &param.name,
            parameter_type: ParameterType { kind },
            parameter_value: RequestValue { value },
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    #[serde(default)]
    job_complete: Option<bool>,
    #[serde(default)]
    job_reference: Option<JobReference>,
    #[serde(default)]
    schema: Option<TableSchema>,
    #[serde(default)]
    rows: Vec<TableRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobReference {
    job_id: String,
}

#[derive(Deserialize)]
struct TableSchema {
    fields: Vec<TableField>,
}

#[derive(Deserialize)]
struct TableField {
    name: String,
}

#[derive(Deserialize)]
struct TableRow {
    f: Vec<TableCell>,
}

#[derive(Deserialize)]
struct TableCell {
    #[serde(default)]
    v: Value,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl QueryResponse {
    fn into_rows(self) -> Result<Vec<AnalyticsRow>, AnalyticsError> {
        if self.job_complete == Some(false) {
            let job_id = self
                .job_reference
                .map(|job| job.job_id)
                .unwrap_or_else(|| "<unknown>".to_string());
            return Err(AnalyticsError::JobIncomplete(job_id));
        }

        if self.rows.is_empty() {
            return Ok(Vec::new());
        }

        let fields = self
            .schema
            .ok_or_else(|| AnalyticsError::MalformedResponse("rows without schema".to_string()))?
            .fields;

        self.rows
            .into_iter()
            .map(|row| {
                if row.f.len() != fields.len() {
                    return Err(AnalyticsError::MalformedResponse(format!(
                        "row has {} cells but schema has {} fields",
                        row.f.len(),
                        fields.len()
                    )));
                }

                Ok(fields
                    .iter()
                    .zip(row.f)
                    .map(|(field, cell)| (field.name.clone(), cell.v))
                    .collect())
            })
            .collect()
    }
}

impl AnalyticsClient for BigQueryClient {
    async fn query(&self, query: &AnalyticsQuery) -> Result<Vec<AnalyticsRow>, AnalyticsError> {
        let body = QueryRequest {
            query: &query.sql,
            use_legacy_sql: false,
            parameter_mode: "NAMED",
            query_parameters: query.params.iter().map(RequestParameter::from).collect(),
        };

        tracing::debug!(sql = %query.sql, params = query.params.len(), "Running analytics query");

        let mut request = self.http.post(self.queries_url()).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);

            return Err(AnalyticsError::QueryRejected {
                status: status.as_u16(),
                message,
            });
        }

        let response: QueryResponse = response.json().await?;
        response.into_rows()
    }
}
