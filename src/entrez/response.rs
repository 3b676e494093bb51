//! Parsers for E-utilities response bodies.
//!
//! Taxonomy lookups come back as `TaxaSet` XML; searches are requested as
//! JSON.

use crate::core::{QueryReference, SearchResponse};
use crate::error::{RemoteError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TaxaSetXml {
    #[serde(rename = "Taxon", default)]
    taxa: Vec<TaxonXml>,
    // Set when the service answers with `<eFetchResult><ERROR>`; the root
    // element name is not checked.
    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TaxonXml {
    #[serde(rename = "ScientificName", default)]
    scientific_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EFetchResultXml {
    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ESearchEnvelope {
    #[serde(default)]
    esearchresult: Option<ESearchResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    count: Option<String>,
    #[serde(default)]
    webenv: Option<String>,
    #[serde(default)]
    querykey: Option<String>,
    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}

/// Extracts the scientific name of the first taxon in a taxonomy `efetch`
/// response.
///
/// # Errors
///
/// Returns `RemoteError::Service` if the body carries an `<ERROR>` element,
/// `RemoteError::TaxonNotFound` if it holds no taxon, and
/// `RemoteError::MalformedResponse` if it is not valid `TaxaSet` XML.
pub fn parse_taxonomy_xml(taxid: &str, xml: &str) -> Result<String> {
    let set: TaxaSetXml =
        quick_xml::de::from_str(xml).map_err(|e| RemoteError::MalformedResponse {
            endpoint: "efetch".to_string(),
            reason: e.to_string(),
        })?;

    if let Some(message) = set.error.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()) {
        return Err(RemoteError::Service {
            endpoint: "efetch".to_string(),
            message,
        }
        .into());
    }

    set.taxa
        .into_iter()
        .next()
        .and_then(|taxon| taxon.scientific_name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            RemoteError::TaxonNotFound {
                taxid: taxid.trim().to_string(),
            }
            .into()
        })
}

/// Turns an XML body received where GenBank text was expected into an
/// error.
///
/// `efetch` answers history failures (expired `WebEnv`, unknown
/// `query_key`) with HTTP 200 and an `<eFetchResult><ERROR>` document.
#[must_use]
pub fn efetch_markup_error(xml: &str) -> RemoteError {
    match quick_xml::de::from_str::<EFetchResultXml>(xml) {
        Ok(EFetchResultXml {
            error: Some(message),
        }) if !message.trim().is_empty() => RemoteError::Service {
            endpoint: "efetch".to_string(),
            message: message.trim().to_string(),
        },
        Ok(_) => RemoteError::MalformedResponse {
            endpoint: "efetch".to_string(),
            reason: "expected GenBank text, got XML without an ERROR element".to_string(),
        },
        Err(e) => RemoteError::MalformedResponse {
            endpoint: "efetch".to_string(),
            reason: e.to_string(),
        },
    }
}

/// Extracts the total count and history handle from an `esearch` JSON
/// response.
///
/// # Errors
///
/// Returns `RemoteError::Service` when the service reports an error and
/// `RemoteError::MalformedResponse` when the body is not JSON or lacks the
/// count or history handle.
pub fn parse_esearch_json(body: &str) -> Result<SearchResponse> {
    let malformed = |reason: String| RemoteError::MalformedResponse {
        endpoint: "esearch".to_string(),
        reason,
    };

    let envelope: ESearchEnvelope =
        serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

    if let Some(message) = envelope.error {
        return Err(RemoteError::Service {
            endpoint: "esearch".to_string(),
            message,
        }
        .into());
    }

    let result = envelope
        .esearchresult
        .ok_or_else(|| malformed("missing esearchresult".to_string()))?;

    if let Some(message) = result.error {
        return Err(RemoteError::Service {
            endpoint: "esearch".to_string(),
            message,
        }
        .into());
    }

    let count = result
        .count
        .ok_or_else(|| malformed("missing count".to_string()))?;
    let count = count
        .trim()
        .parse::<u64>()
        .map_err(|e| malformed(format!("invalid count {count:?}: {e}")))?;

    let web_env = result
        .webenv
        .filter(|v| !v.is_empty())
        .ok_or_else(|| malformed("missing webenv (history not retained)".to_string()))?;
    let query_key = result
        .querykey
        .filter(|v| !v.is_empty())
        .ok_or_else(|| malformed("missing querykey (history not retained)".to_string()))?;

    Ok(SearchResponse {
        count,
        query: QueryReference { web_env, query_key },
    })
}
