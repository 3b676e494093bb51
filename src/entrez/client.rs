//! Blocking HTTP client for NCBI E-utilities.

use crate::core::{QueryReference, SearchResponse, Session};
use crate::entrez::SequenceDatabase;
use crate::entrez::response::{efetch_markup_error, parse_esearch_json, parse_taxonomy_xml};
use crate::error::{Error, RemoteError, Result};
use reqwest::blocking::{Client, Response};
use std::io::{self, BufRead, BufReader, Read};
use tracing::debug;

/// Public E-utilities endpoint.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// E-utilities client bound to one [`Session`].
///
/// Every request carries the session's `tool`, `email` and `api_key`
/// parameters. Timeouts and connection handling are the HTTP client's
/// defaults.
#[derive(Debug, Clone)]
pub struct EutilsClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl EutilsClient {
    /// Creates a client for the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    /// (e.g. no TLS backend).
    pub fn new(session: Session) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            session,
        })
    }

    /// Points the client at a different E-utilities base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL of an E-utility.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}.fcgi", self.base_url.trim_end_matches('/'))
    }

    /// Query parameters for a taxonomy lookup.
    #[must_use]
    pub fn taxonomy_params(&self, taxid: &str) -> Vec<(&'static str, String)> {
        self.with_identity(vec![
            ("db", "taxonomy".to_string()),
            ("id", taxid.trim().to_string()),
            ("retmode", "xml".to_string()),
        ])
    }

    /// Query parameters for a history-backed nucleotide search.
    #[must_use]
    pub fn search_params(&self, term: &str, search_cap: usize) -> Vec<(&'static str, String)> {
        self.with_identity(vec![
            ("db", "nucleotide".to_string()),
            ("term", term.to_string()),
            ("usehistory", "y".to_string()),
            ("retmax", search_cap.to_string()),
            ("retmode", "json".to_string()),
        ])
    }

    /// Query parameters for fetching GenBank records of a stored query.
    #[must_use]
    pub fn fetch_params(
        &self,
        query: &QueryReference,
        max_records: usize,
    ) -> Vec<(&'static str, String)> {
        self.with_identity(vec![
            ("db", "nucleotide".to_string()),
            ("rettype", "gb".to_string()),
            ("retmode", "text".to_string()),
            ("retmax", max_records.to_string()),
            ("WebEnv", query.web_env.clone()),
            ("query_key", query.query_key.clone()),
        ])
    }

    fn with_identity(
        &self,
        mut params: Vec<(&'static str, String)>,
    ) -> Vec<(&'static str, String)> {
        params.extend(self.session.identity_params());
        params
    }

    fn get(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Response> {
        let url = self.endpoint_url(endpoint);
        debug!(
            url = %url,
            params = ?params.iter().filter(|(name, _)| *name != "api_key").collect::<Vec<_>>(),
            "E-utilities request"
        );

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .map_err(|e| RemoteError::Transport {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown status").to_string()
            } else {
                body.trim().to_string()
            };
            return Err(RemoteError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(response)
    }

    fn get_text(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<String> {
        self.get(endpoint, params)?
            .text()
            .map_err(|e| {
                RemoteError::Transport {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

impl SequenceDatabase for EutilsClient {
    fn scientific_name(&self, taxid: &str) -> Result<String> {
        let body = self.get_text("efetch", &self.taxonomy_params(taxid))?;
        parse_taxonomy_xml(taxid, &body)
    }

    fn search(&self, term: &str, search_cap: usize) -> Result<SearchResponse> {
        let body = self.get_text("esearch", &self.search_params(term, search_cap))?;
        parse_esearch_json(&body)
    }

    fn fetch(&self, query: &QueryReference, max_records: usize) -> Result<Box<dyn Read>> {
        let response = self.get("efetch", &self.fetch_params(query, max_records))?;
        let mut reader = BufReader::new(response);

        let transport = |e: io::Error| RemoteError::Transport {
            endpoint: "efetch".to_string(),
            reason: e.to_string(),
        };
        if starts_with_markup(&mut reader).map_err(transport)? {
            let mut body = String::new();
            reader.read_to_string(&mut body).map_err(transport)?;
            return Err(efetch_markup_error(&body).into());
        }

        Ok(Box::new(reader))
    }
}

/// Whether the first non-whitespace byte is `<`. Leading whitespace is
/// consumed; nothing else is.
fn starts_with_markup<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(false);
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(skip) => {
                let first = buf[skip];
                reader.consume(skip);
                return Ok(first == b'<');
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread::{self, JoinHandle};

    fn client() -> EutilsClient {
        EutilsClient::new(Session::new("me@example.org", "secret")).unwrap()
    }

    /// Client for a local server; proxies from the environment are ignored.
    fn local_client(addr: SocketAddr) -> EutilsClient {
        EutilsClient {
            http: Client::builder().no_proxy().build().unwrap(),
            base_url: format!("http://{addr}"),
            session: Session::new("me@example.org", ""),
        }
    }

    /// Serves one canned HTTP response and returns the request head.
    fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut chunk = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (addr, handle)
    }

    fn query() -> QueryReference {
        QueryReference {
            web_env: "MCID_abc".to_string(),
            query_key: "1".to_string(),
        }
    }

    fn value<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_endpoint_url() {
        let client = client();
        assert_eq!(
            client.endpoint_url("esearch"),
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi"
        );

        let client = client.with_base_url("http://localhost:8080/eutils/");
        assert_eq!(
            client.endpoint_url("efetch"),
            "http://localhost:8080/eutils/efetch.fcgi"
        );
    }

    #[test]
    fn test_taxonomy_params() {
        let params = client().taxonomy_params(" 9606 ");
        assert_eq!(value(&params, "db"), Some("taxonomy"));
        assert_eq!(value(&params, "id"), Some("9606"));
        assert_eq!(value(&params, "retmode"), Some("xml"));
        assert_eq!(value(&params, "tool"), Some("taxfetch"));
    }

    #[test]
    fn test_search_params() {
        let params = client().search_params("txid9606[Organism]", 1000);
        assert_eq!(value(&params, "db"), Some("nucleotide"));
        assert_eq!(value(&params, "term"), Some("txid9606[Organism]"));
        assert_eq!(value(&params, "usehistory"), Some("y"));
        assert_eq!(value(&params, "retmax"), Some("1000"));
        assert_eq!(value(&params, "email"), Some("me@example.org"));
        assert_eq!(value(&params, "api_key"), Some("secret"));
    }

    #[test]
    fn test_fetch_params() {
        let query = QueryReference {
            web_env: "MCID_abc".to_string(),
            query_key: "1".to_string(),
        };
        let params = client().fetch_params(&query, 200);
        assert_eq!(value(&params, "rettype"), Some("gb"));
        assert_eq!(value(&params, "retmode"), Some("text"));
        assert_eq!(value(&params, "retmax"), Some("200"));
        assert_eq!(value(&params, "WebEnv"), Some("MCID_abc"));
        assert_eq!(value(&params, "query_key"), Some("1"));
    }

    #[test]
    fn test_rate_limited_without_body() {
        let (addr, server) = serve_once("429 Too Many Requests", "");
        let err = local_client(addr).search("txid9606[Organism]", 10).unwrap_err();
        server.join().unwrap();

        assert!(matches!(
            err,
            Error::Remote(ref remote @ RemoteError::Http { ref endpoint, status: 429, ref message })
                if endpoint == "esearch" && message == "Too Many Requests" && remote.is_retryable()
        ));
    }

    #[test]
    fn test_server_error_keeps_body() {
        let (addr, server) = serve_once("500 Internal Server Error", "  boom\n");
        let err = local_client(addr).scientific_name("9606").unwrap_err();
        server.join().unwrap();

        assert!(matches!(
            err,
            Error::Remote(RemoteError::Http { status: 500, ref message, .. }) if message == "boom"
        ));
    }

    #[test]
    fn test_search_success_sends_identity() {
        let (addr, server) = serve_once(
            "200 OK",
            r#"{"esearchresult":{"count":"42","retmax":"10","webenv":"MCID_xyz","querykey":"1"}}"#,
        );
        let response = local_client(addr).search("txid9606[Organism]", 10).unwrap();
        let request = server.join().unwrap();

        assert_eq!(response.count, 42);
        assert_eq!(response.query.web_env, "MCID_xyz");
        assert!(request.starts_with("GET /esearch.fcgi?"));
        assert!(request.contains("tool=taxfetch"));
        assert!(!request.contains("api_key="));
    }

    #[test]
    fn test_connection_refused_is_transport() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let err = local_client(addr).scientific_name("9606").unwrap_err();

        assert!(matches!(
            err,
            Error::Remote(ref remote @ RemoteError::Transport { ref endpoint, .. })
                if endpoint == "efetch" && remote.is_retryable()
        ));
    }

    #[test]
    fn test_fetch_history_error_is_service() {
        let (addr, server) = serve_once(
            "200 OK",
            "<?xml version=\"1.0\" ?>\n<eFetchResult>\n\t<ERROR>Cannot retrieve query from history</ERROR>\n</eFetchResult>\n",
        );
        let result = local_client(addr).fetch(&query(), 5);
        server.join().unwrap();

        assert!(matches!(
            result,
            Err(Error::Remote(RemoteError::Service { ref message, .. }))
                if message == "Cannot retrieve query from history"
        ));
    }

    #[test]
    fn test_fetch_streams_genbank_text() {
        let (addr, server) = serve_once("200 OK", "\nLOCUS       A00001  10 bp  DNA\n//\n");
        let mut body = String::new();
        local_client(addr)
            .fetch(&query(), 5)
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        server.join().unwrap();

        assert!(body.starts_with("LOCUS"));
    }

    #[test]
    fn test_starts_with_markup() {
        let mut reader = Cursor::new(" \n\t<eFetchResult/>");
        assert!(starts_with_markup(&mut reader).unwrap());
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "<eFetchResult/>");

        assert!(!starts_with_markup(&mut Cursor::new("LOCUS x")).unwrap());
        assert!(!starts_with_markup(&mut Cursor::new("   ")).unwrap());
        assert!(!starts_with_markup(&mut Cursor::new("")).unwrap());
    }
}
