// src/services/sparql.rs

//! Client for the data.open.ac.uk SPARQL endpoint.
//!
//! Queries are plain GET requests with the query string (plus offset/limit)
//! in a URL parameter; responses arrive as `application/sparql-results+json`
//! and are flattened to `variable -> value` maps.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{Code, HttpConfig};

/// Current courses in the xcri graph.
pub const COURSES_QUERY: &str = r#"PREFIX xcri: <http://xcri.org/profiles/catalog/1.2/>
PREFIX dc: <http://purl.org/dc/elements/1.1/>
PREFIX mlo: <http://purl.org/net/mlo/>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>

SELECT ?id ?title ?url ?type
FROM <http://data.open.ac.uk/context/xcri> WHERE {
  ?course a xcri:course .
  ?course xcri:internalID ?id .
  ?course dc:title ?title .
  ?course mlo:url ?url .
  ?course rdf:type ?type
  FILTER (STRSTARTS ( STR ( ?type ), "http://data.open.ac.uk/ontology/" ))
  {filter}
}
"#;

/// Current qualifications.
pub const QUALIFICATIONS_QUERY: &str = r#"PREFIX mlo: <http://purl.org/net/mlo/>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX vocab: <http://purl.org/vocab/aiiso/schema#>

SELECT ?id ?title ?url ?type
FROM <http://data.open.ac.uk/context/qualification> WHERE {
  ?qualification vocab:code ?id .
  ?qualification vocab:name ?title .
  ?qualification mlo:url ?url .
  ?qualification rdf:type ?type
  FILTER (STRSTARTS ( STR ( ?type ), "http://data.open.ac.uk/saou/ontology" ))
  {filter}
}
"#;

/// Retired course codes; these entries carry no URL.
pub const OLDCOURSES_QUERY: &str = r#"PREFIX aiiso: <http://purl.org/vocab/aiiso/schema#>
PREFIX dcterms: <http://purl.org/dc/terms/>

SELECT ?id ?title
FROM <http://data.open.ac.uk/context/oldcourses> WHERE {
  ?course a aiiso:Module .
  ?course aiiso:code ?id .
  ?course dcterms:title ?title
  {filter}
}
"#;

/// A single result row: variable name to value.
pub type Binding = HashMap<String, String>;

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

/// Substitute the per-code exact-match filter into a query template.
pub fn with_code_filter(template: &str, code: &Code) -> String {
    template.replace(
        "{filter}",
        &format!("FILTER(?id = \"{}\")", code.as_str()),
    )
}

/// Thin client around the SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    client: Client,
    endpoint: String,
}

impl SparqlClient {
    /// Create a client for the given endpoint.
    pub fn new(endpoint: impl Into<String>, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&http.user_agent)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Run a query with the given window and flatten the result bindings.
    pub async fn query(&self, query: &str, offset: u32, limit: u32) -> Result<Vec<Binding>> {
        let windowed = format!("{query} offset {offset} limit {limit}");
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[("query", windowed.as_str())])
            .header(ACCEPT, "application/sparql-results+json")
            .send()
            .await?
            .text()
            .await?;
        parse_bindings(&body)
    }
}

/// Parse a sparql-results+json document into flat bindings.
pub fn parse_bindings(body: &str) -> Result<Vec<Binding>> {
    let response: SparqlResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .bindings
        .into_iter()
        .map(|binding| {
            binding
                .into_iter()
                .map(|(name, value)| (name, value.value))
                .collect()
        })
        .collect())
}
