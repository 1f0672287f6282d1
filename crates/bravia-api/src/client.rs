// Bravia HTTP client
//
// Wraps `reqwest::Client` with the two endpoints the TV exposes for IP
// control: the `system` JSON-RPC service (command-table discovery) and
// the `IRCC` SOAP service (command execution). URL construction happens
// per call because the TV address lives in mutable credential storage.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// JSON-RPC id used by the original remote for `getRemoteControllerInfo`.
const DISCOVERY_RPC_ID: u32 = 54;

const SOAP_ACTION: &str = "\"urn:schemas-sony-com:service:IRCC:1#X_SendIRCC\"";

/// One `{name, value}` pair from the discovery response: a human-level
/// command name mapped to the opaque IRCC activation code the TV expects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandEntry {
    pub name: String,
    pub value: String,
}

/// Success shape: `{"result": [<controller info>, [{name, value}, ...]], "id": 54}`.
/// Only the second positional element matters; the first is ignored.
#[derive(Deserialize)]
struct SystemResponse {
    result: Option<Vec<serde_json::Value>>,
    error: Option<serde_json::Value>,
}

/// Raw HTTP client for a Bravia set's IP control endpoints.
pub struct BraviaClient {
    http: reqwest::Client,
}

impl BraviaClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch the remote-controller command table from the TV.
    ///
    /// POSTs `getRemoteControllerInfo` to `http://{address}/sony/system`
    /// and parses the `{result: [_, [{name, value}, ...]]}` shape. A
    /// response that doesn't match yields [`Error::MalformedResponse`]
    /// rather than a silent drop, so every request reaches a terminal
    /// outcome.
    pub async fn remote_controller_info(
        &self,
        address: &str,
    ) -> Result<Vec<CommandEntry>, Error> {
        let url = endpoint_url(address, "sony/system")?;
        debug!(%url, "POST getRemoteControllerInfo");

        let body = json!({
            "method": "getRemoteControllerInfo",
            "params": [],
            "id": DISCOVERY_RPC_ID,
            "version": "1.0",
        });

        let resp = self.http.post(url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let parsed: SystemResponse = resp.json().await?;

        if let Some(err) = parsed.error {
            return Err(Error::MalformedResponse {
                message: format!("TV reported RPC error: {err}"),
            });
        }

        let Some(result) = parsed.result else {
            return Err(Error::MalformedResponse {
                message: "missing `result` array".into(),
            });
        };

        let Some(raw_entries) = result.into_iter().nth(1) else {
            return Err(Error::MalformedResponse {
                message: "`result` has no second element".into(),
            });
        };

        let entries: Vec<CommandEntry> =
            serde_json::from_value(raw_entries).map_err(|e| Error::MalformedResponse {
                message: format!("command list shape: {e}"),
            })?;

        trace!(count = entries.len(), "discovery returned command entries");
        Ok(entries)
    }

    /// Send a single IRCC activation code to the TV.
    ///
    /// POSTs an `X_SendIRCC` SOAP envelope to `http://{address}/sony/IRCC`
    /// with the pre-shared key in `X-Auth-PSK`. The TV answers with an
    /// empty body on success; any non-2xx status maps to [`Error::Status`].
    pub async fn send_ircc(
        &self,
        address: &str,
        psk: &SecretString,
        code: &str,
    ) -> Result<(), Error> {
        let url = endpoint_url(address, "sony/IRCC")?;
        debug!(%url, "POST X_SendIRCC");

        let envelope = ircc_envelope(code);

        let resp = self
            .http
            .post(url)
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("X-Auth-PSK", psk.expose_secret())
            .header("SOAPACTION", SOAP_ACTION)
            .body(envelope)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

/// Build `http://{address}/{path}` from the stored TV address.
///
/// The address is host (optionally `host:port`) as the user entered it;
/// a malformed one surfaces as [`Error::InvalidUrl`].
fn endpoint_url(address: &str, path: &str) -> Result<Url, Error> {
    Ok(Url::parse(&format!("http://{address}/{path}"))?)
}

/// The SOAP envelope carrying one `IRCCCode`, byte-for-byte the shape
/// the IRCC service accepts.
fn ircc_envelope(code: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\
         <s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">\
         <s:Body>\
         <u:X_SendIRCC xmlns:u=\"urn:schemas-sony-com:service:IRCC:1\">\
         <IRCCCode>{code}</IRCCCode>\
         </u:X_SendIRCC>\
         </s:Body>\
         </s:Envelope>"
    )
}
