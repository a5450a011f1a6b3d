//! IBM Quantum Platform REST client.
//!
//! Covers the calls needed to run one Sampler job: authentication, device
//! discovery, submission, status polling, result retrieval and cancellation.
//! Both the IBM Cloud API (`quantum.cloud.ibm.com/api`) and the legacy
//! endpoint (`api.quantum-computing.ibm.com`) are supported.

use reqwest::{Client, Response, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::credentials::IbmCredentials;
use crate::error::{IbmError, IbmResult};

/// IBM Quantum Cloud API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://quantum.cloud.ibm.com/api";

/// Legacy IBM Quantum API endpoint.
pub const LEGACY_ENDPOINT: &str = "https://api.quantum-computing.ibm.com";

const IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

const IBM_API_VERSION: &str = "2026-02-01";

/// Cloudflare in front of the API rejects the default reqwest agent.
const USER_AGENT: &str = concat!("qpick/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// IBM Quantum API client.
pub struct IbmClient {
    client: Client,
    endpoint: String,
    /// Hub/group/project, legacy mode only.
    instance: Option<String>,
    cloud_api: bool,
}

impl fmt::Debug for IbmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmClient")
            .field("endpoint", &self.endpoint)
            .field("instance", &self.instance)
            .field("cloud_api", &self.cloud_api)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
}

fn json_headers(bearer: &str) -> IbmResult<header::HeaderMap> {
    let mut headers = header::HeaderMap::new();
    let mut auth = header::HeaderValue::from_str(&format!("Bearer {bearer}"))
        .map_err(|_| IbmError::InvalidToken)?;
    auth.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth);
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );
    Ok(headers)
}

fn build_client(headers: header::HeaderMap) -> IbmResult<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?)
}

impl IbmClient {
    /// Client for the legacy endpoint with a direct bearer token.
    pub fn new(endpoint: impl Into<String>, token: &str) -> IbmResult<Self> {
        Ok(Self {
            client: build_client(json_headers(token)?)?,
            endpoint: endpoint.into(),
            instance: None,
            cloud_api: false,
        })
    }

    /// Client for the IBM Cloud API.
    ///
    /// Exchanges `api_key` for an IAM bearer token and attaches the
    /// `Service-CRN` and `IBM-API-Version` headers the Cloud API requires.
    pub async fn connect(api_key: &str, service_crn: &str) -> IbmResult<Self> {
        let iam_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        let response = iam_client
            .post(IAM_TOKEN_URL)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(format!(
                "grant_type=urn:ibm:params:oauth:grant-type:apikey&apikey={api_key}"
            ))
            .send()
            .await
            .map_err(|e| IbmError::IamTokenExchange(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            return Err(IbmError::IamTokenExchange(format!(
                "IAM returned {status}: {body}"
            )));
        }

        let iam: IamTokenResponse = response.json().await.map_err(|e| {
            IbmError::IamTokenExchange(format!("failed to parse IAM response: {e}"))
        })?;

        let mut headers = json_headers(&iam.access_token)?;
        headers.insert(
            header::HeaderName::from_static("service-crn"),
            header::HeaderValue::from_str(service_crn)
                .map_err(|_| IbmError::InvalidParameter("invalid Service-CRN value".into()))?,
        );
        headers.insert(
            header::HeaderName::from_static("ibm-api-version"),
            header::HeaderValue::from_static(IBM_API_VERSION),
        );

        Ok(Self {
            client: build_client(headers)?,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            instance: None,
            cloud_api: true,
        })
    }

    /// Client for whichever credentials were discovered.
    pub async fn from_credentials(credentials: &IbmCredentials) -> IbmResult<Self> {
        match credentials {
            IbmCredentials::Cloud {
                api_key,
                service_crn,
            } => {
                tracing::info!("connecting to IBM Cloud API (IAM key exchange)");
                Self::connect(api_key, service_crn).await
            }
            IbmCredentials::Legacy { token } => {
                tracing::info!("using legacy IBM Quantum token");
                Self::new(LEGACY_ENDPOINT, token)
            }
        }
    }

    /// Set the instance (hub/group/project) for job submission (legacy mode).
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Whether this client uses the Cloud API.
    pub fn is_cloud_api(&self) -> bool {
        self.cloud_api
    }

    /// API base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Decode a successful response, or turn a failed one into an error.
    ///
    /// `not_found` builds the error for a 404 when the caller has a more
    /// specific one than a generic API error.
    async fn decode<T: DeserializeOwned>(
        response: Response,
        context: &str,
        not_found: Option<IbmError>,
    ) -> IbmResult<T> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(err) = not_found {
                return Err(err);
            }
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "no body".to_string());
        let message = serde_json::from_str::<ApiErrorResponse>(&body)
            .ok()
            .and_then(ApiErrorResponse::into_message)
            .unwrap_or(body);
        Err(IbmError::ApiError {
            status: Some(status.as_u16()),
            message: format!("{context}: {message}"),
        })
    }

    /// List devices visible to these credentials.
    ///
    /// On the Cloud API the listing only carries names, so each device's
    /// configuration and status are fetched individually. Devices whose
    /// details cannot be fetched are skipped.
    pub async fn list_backends(&self) -> IbmResult<Vec<BackendInfo>> {
        let url = format!("{}/v1/backends", self.endpoint);
        let response = self.client.get(&url).send().await?;

        if !self.cloud_api {
            let listing: LegacyBackendsResponse =
                Self::decode(response, "list backends failed", None).await?;
            return Ok(listing.backends);
        }

        let listing: DevicesResponse = Self::decode(response, "list backends failed", None).await?;
        let mut backends = Vec::with_capacity(listing.devices.len());
        for device in &listing.devices {
            match self.get_backend(&device.name).await {
                Ok(info) => backends.push(info),
                Err(e) => tracing::warn!("skipping backend {}: {e}", device.name),
            }
        }
        Ok(backends)
    }

    /// Details for one device.
    pub async fn get_backend(&self, name: &str) -> IbmResult<BackendInfo> {
        let missing = || Some(IbmError::BackendUnavailable(name.to_string()));

        if !self.cloud_api {
            let url = format!("{}/v1/backends/{name}", self.endpoint);
            let response = self.client.get(&url).send().await?;
            return Self::decode(response, "backend lookup failed", missing()).await;
        }

        let url = format!("{}/v1/backends/{name}/configuration", self.endpoint);
        let response = self.client.get(&url).send().await?;
        let config: BackendConfigResponse =
            Self::decode(response, "backend configuration failed", missing()).await?;

        let url = format!("{}/v1/backends/{name}/status", self.endpoint);
        let response = self.client.get(&url).send().await?;
        let status = if response.status().is_success() {
            let s: BackendStatusResponse = Self::decode(response, "backend status failed", None).await?;
            s.into()
        } else {
            // Configuration was readable; treat the device as up.
            BackendStatus {
                operational: true,
                status_msg: None,
                pending_jobs: None,
            }
        };

        Ok(config.into_info(status))
    }

    /// Submit one `OpenQASM` 3 circuit to the Sampler primitive.
    ///
    /// `optimization_level` controls the provider's transpilation (0-3).
    pub async fn submit_sampler_job(
        &self,
        backend: &str,
        qasm: String,
        shots: u32,
        optimization_level: u8,
    ) -> IbmResult<SubmitResponse> {
        let url = format!("{}/v1/jobs", self.endpoint);
        let body = sampler_request(
            backend,
            qasm,
            shots,
            optimization_level,
            self.cloud_api,
            self.instance.as_deref(),
        );

        let response = self.client.post(&url).json(&body).send().await?;
        Self::decode(response, "job submission failed", None).await
    }

    /// Get job status.
    pub async fn get_job_status(&self, job_id: &str) -> IbmResult<JobStatusResponse> {
        let url = format!("{}/v1/jobs/{job_id}", self.endpoint);
        let response = self.client.get(&url).send().await?;
        Self::decode(
            response,
            "job status failed",
            Some(IbmError::JobNotFound(job_id.to_string())),
        )
        .await
    }

    /// Get job results.
    pub async fn get_job_results(&self, job_id: &str) -> IbmResult<JobResultResponse> {
        let url = format!("{}/v1/jobs/{job_id}/results", self.endpoint);
        let response = self.client.get(&url).send().await?;
        Self::decode(
            response,
            "job results failed",
            Some(IbmError::JobNotFound(job_id.to_string())),
        )
        .await
    }

    /// Cancel a job.
    pub async fn cancel_job(&self, job_id: &str) -> IbmResult<()> {
        let url = format!("{}/v1/jobs/{job_id}/cancel", self.endpoint);
        let response = self.client.post(&url).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(IbmError::JobNotFound(job_id.to_string()));
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "no body".to_string());
        Err(IbmError::ApiError {
            status: Some(status.as_u16()),
            message: format!("cancel failed: {body}"),
        })
    }
}

/// Sampler request body.
///
/// The Cloud API takes V2 PUBs (`[circuit, params, shots]`); the legacy API
/// takes the V1 circuit list.
fn sampler_request(
    backend: &str,
    qasm: String,
    shots: u32,
    optimization_level: u8,
    cloud_api: bool,
    instance: Option<&str>,
) -> serde_json::Value {
    if cloud_api {
        serde_json::json!({
            "program_id": "sampler",
            "backend": backend,
            "params": {
                "version": 2,
                "pubs": [[qasm, {}, shots]],
                "options": { "optimization_level": optimization_level }
            }
        })
    } else {
        let mut request = serde_json::json!({
            "program_id": "sampler",
            "backend": backend,
            "params": {
                "circuits": [qasm],
                "shots": shots,
                "optimization_level": optimization_level
            }
        });
        if let Some(hub) = instance {
            request["hub"] = serde_json::json!(hub);
        }
        request
    }
}

/// Least busy operational hardware device with at least `min_qubits` qubits.
///
/// Simulators and devices reporting non-operational status are skipped. Ties
/// on queue length go to the alphabetically first name; devices with an
/// unknown queue sort last.
pub fn pick_least_busy(backends: &[BackendInfo], min_qubits: usize) -> Option<&BackendInfo> {
    backends
        .iter()
        .filter(|b| b.status.operational && !b.simulator && b.num_qubits >= min_qubits)
        .min_by(|a, b| {
            let qa = a.status.pending_jobs.unwrap_or(u32::MAX);
            let qb = b.status.pending_jobs.unwrap_or(u32::MAX);
            qa.cmp(&qb).then_with(|| a.name.cmp(&b.name))
        })
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

impl ApiErrorResponse {
    fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.is_empty())
            .or_else(|| self.errors.into_iter().map(|e| e.message).find(|m| !m.is_empty()))
    }
}

/// Cloud API device listing (`{"devices": [...]}`).
#[derive(Debug, Deserialize)]
struct DevicesResponse {
    devices: Vec<DeviceEntry>,
}

#[derive(Debug, Deserialize)]
struct DeviceEntry {
    name: String,
}

/// Legacy API listing (`{"backends": [...]}`).
#[derive(Debug, Deserialize)]
struct LegacyBackendsResponse {
    backends: Vec<BackendInfo>,
}

/// `/backends/{name}/configuration` on the Cloud API.
#[derive(Debug, Deserialize)]
struct BackendConfigResponse {
    backend_name: String,
    n_qubits: usize,
    #[serde(default)]
    basis_gates: Vec<String>,
    #[serde(default)]
    simulator: Option<bool>,
    #[serde(default)]
    max_shots: Option<u32>,
}

impl BackendConfigResponse {
    fn into_info(self, status: BackendStatus) -> BackendInfo {
        BackendInfo {
            name: self.backend_name,
            num_qubits: self.n_qubits,
            status,
            basis_gates: self.basis_gates,
            simulator: self.simulator.unwrap_or(false),
            max_shots: self.max_shots,
        }
    }
}

/// `/backends/{name}/status` on the Cloud API.
#[derive(Debug, Deserialize)]
struct BackendStatusResponse {
    state: bool,
    #[serde(default)]
    status: String,
    #[serde(default)]
    length_queue: u64,
}

impl From<BackendStatusResponse> for BackendStatus {
    fn from(s: BackendStatusResponse) -> Self {
        BackendStatus {
            operational: s.state,
            status_msg: Some(s.status).filter(|m| !m.is_empty()),
            pending_jobs: Some(u32::try_from(s.length_queue).unwrap_or(u32::MAX)),
        }
    }
}

/// A device as reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendInfo {
    /// Device name, e.g. `ibm_torino`.
    pub name: String,
    /// Number of qubits.
    pub num_qubits: usize,
    /// Operational status and queue.
    pub status: BackendStatus,
    /// Native gates.
    #[serde(default)]
    pub basis_gates: Vec<String>,
    /// Whether this is a simulator.
    #[serde(default)]
    pub simulator: bool,
    /// Maximum shots per job.
    #[serde(default)]
    pub max_shots: Option<u32>,
}

/// Device status.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendStatus {
    /// Whether the device accepts jobs.
    pub operational: bool,
    /// Status message.
    #[serde(default)]
    pub status_msg: Option<String>,
    /// Jobs waiting in the queue.
    #[serde(default)]
    pub pending_jobs: Option<u32>,
}

/// Job submission response.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    /// Job ID.
    pub id: String,
}

/// Job status response.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID.
    pub id: String,
    /// Status, mixed case on the Cloud API.
    pub status: String,
    /// Failure detail (legacy API).
    #[serde(default)]
    pub error: Option<JobError>,
    /// State with failure reason (Cloud API).
    #[serde(default)]
    pub state: Option<JobState>,
}

/// Legacy job failure detail.
#[derive(Debug, Clone, Deserialize)]
pub struct JobError {
    /// Error message.
    pub message: String,
}

/// Cloud API job state.
#[derive(Debug, Clone, Deserialize)]
pub struct JobState {
    /// Reason for failure.
    #[serde(default)]
    pub reason: Option<String>,
}

impl JobStatusResponse {
    fn normalized_status(&self) -> String {
        self.status.to_uppercase()
    }

    /// Check if job completed successfully.
    pub fn is_completed(&self) -> bool {
        self.normalized_status() == "COMPLETED"
    }

    /// Check if job failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.normalized_status().as_str(), "FAILED" | "ERROR")
    }

    /// Check if job was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.normalized_status() == "CANCELLED"
    }

    /// Failure reason, preferring the Cloud API field.
    pub fn error_message(&self) -> Option<String> {
        self.state
            .as_ref()
            .and_then(|s| s.reason.clone())
            .or_else(|| self.error.as_ref().map(|e| e.message.clone()))
    }
}

/// Job result response.
#[derive(Debug, Deserialize)]
pub struct JobResultResponse {
    /// One entry per submitted circuit.
    pub results: Vec<SamplerResult>,
}

/// Sampler result for one circuit.
#[derive(Debug, Deserialize)]
pub struct SamplerResult {
    /// V2: classical register name to per-shot samples.
    #[serde(default)]
    pub data: Option<HashMap<String, ClassicalRegisterData>>,
    /// V1: aggregated counts keyed by hex or binary outcome.
    #[serde(default)]
    pub counts: Option<HashMap<String, u64>>,
}

/// Classical register data from V2 Sampler results.
#[derive(Debug, Deserialize)]
pub struct ClassicalRegisterData {
    /// One hex string per shot, e.g. `["0x0", "0x2"]`.
    pub samples: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, qubits: usize, queue: Option<u32>, operational: bool) -> BackendInfo {
        BackendInfo {
            name: name.into(),
            num_qubits: qubits,
            status: BackendStatus {
                operational,
                status_msg: None,
                pending_jobs: queue,
            },
            basis_gates: vec![],
            simulator: false,
            max_shots: None,
        }
    }

    #[test]
    fn test_least_busy_prefers_short_queue() {
        let devices = vec![
            device("ibm_fez", 156, Some(40), true),
            device("ibm_torino", 133, Some(3), true),
            device("ibm_marrakesh", 156, Some(12), true),
        ];
        assert_eq!(pick_least_busy(&devices, 6).unwrap().name, "ibm_torino");
    }

    #[test]
    fn test_least_busy_skips_offline_small_and_simulators() {
        let mut sim = device("simulator_stabilizer", 5000, Some(0), true);
        sim.simulator = true;
        let devices = vec![
            device("ibm_down", 133, Some(0), false),
            device("ibm_tiny", 5, Some(0), true),
            sim,
            device("ibm_kyiv", 127, Some(9), true),
        ];
        assert_eq!(pick_least_busy(&devices, 6).unwrap().name, "ibm_kyiv");
    }

    #[test]
    fn test_least_busy_ties_and_unknown_queue() {
        let devices = vec![
            device("ibm_b", 10, Some(2), true),
            device("ibm_a", 10, Some(2), true),
            device("ibm_unknown", 10, None, true),
        ];
        assert_eq!(pick_least_busy(&devices, 1).unwrap().name, "ibm_a");
    }

    #[test]
    fn test_least_busy_none_eligible() {
        let devices = vec![device("ibm_tiny", 5, Some(0), true)];
        assert!(pick_least_busy(&devices, 6).is_none());
        assert!(pick_least_busy(&[], 1).is_none());
    }

    #[test]
    fn test_job_status_terminal_variants() {
        let failed: JobStatusResponse = serde_json::from_str(
            r#"{"id": "j", "status": "FAILED", "error": {"message": "Test error"}}"#,
        )
        .unwrap();
        assert!(failed.is_failed());
        assert!(!failed.is_completed());
        assert_eq!(failed.error_message().unwrap(), "Test error");

        let done: JobStatusResponse =
            serde_json::from_str(r#"{"id": "j", "status": "Completed"}"#).unwrap();
        assert!(done.is_completed());

        let cancelled: JobStatusResponse =
            serde_json::from_str(r#"{"id": "j", "status": "Cancelled"}"#).unwrap();
        assert!(cancelled.is_cancelled());
    }

    #[test]
    fn test_job_status_cloud_reason_wins() {
        let status: JobStatusResponse = serde_json::from_str(
            r#"{
                "id": "j",
                "status": "Failed",
                "state": {"status": "Failed", "reason": "circuit too deep", "reason_code": 1513},
                "error": {"message": "legacy text"}
            }"#,
        )
        .unwrap();
        assert_eq!(status.error_message().unwrap(), "circuit too deep");
    }

    #[test]
    fn test_cloud_sampler_request() {
        let body = sampler_request("ibm_torino", "OPENQASM 3.0;".into(), 1, 1, true, None);
        assert_eq!(body["program_id"], "sampler");
        assert_eq!(body["backend"], "ibm_torino");
        assert_eq!(body["params"]["version"], 2);
        assert_eq!(body["params"]["pubs"][0][0], "OPENQASM 3.0;");
        assert_eq!(body["params"]["pubs"][0][2], 1);
        assert_eq!(body["params"]["options"]["optimization_level"], 1);
        assert!(body.get("hub").is_none());
    }

    #[test]
    fn test_legacy_sampler_request_with_hub() {
        let body = sampler_request(
            "ibm_kyiv",
            "OPENQASM 3.0;".into(),
            1,
            3,
            false,
            Some("ibm-q/open/main"),
        );
        assert_eq!(body["params"]["circuits"][0], "OPENQASM 3.0;");
        assert_eq!(body["params"]["shots"], 1);
        assert_eq!(body["params"]["optimization_level"], 3);
        assert_eq!(body["hub"], "ibm-q/open/main");
    }

    #[test]
    fn test_devices_response_deserialization() {
        let json = r#"{"devices": [
            {"name": "ibm_fez", "status": {"name": "online"}},
            {"name": "ibm_torino", "status": {"name": "online"}}
        ]}"#;
        let resp: DevicesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.devices.len(), 2);
        assert_eq!(resp.devices[1].name, "ibm_torino");
    }

    #[test]
    fn test_cloud_backend_merges_config_and_status() {
        let config: BackendConfigResponse = serde_json::from_str(
            r#"{
                "backend_name": "ibm_torino",
                "n_qubits": 133,
                "basis_gates": ["cz", "id", "rz", "sx", "x"],
                "simulator": false
            }"#,
        )
        .unwrap();
        let status: BackendStatusResponse = serde_json::from_str(
            r#"{"state": true, "status": "active", "message": "ready", "length_queue": 7}"#,
        )
        .unwrap();

        let info = config.into_info(status.into());
        assert_eq!(info.name, "ibm_torino");
        assert_eq!(info.num_qubits, 133);
        assert!(info.status.operational);
        assert_eq!(info.status.status_msg.as_deref(), Some("active"));
        assert_eq!(info.status.pending_jobs, Some(7));
        assert!(!info.simulator);
    }

    #[test]
    fn test_legacy_backends_deserialization() {
        let json = r#"{"backends": [
            {"name": "ibm_kyiv", "num_qubits": 127, "status": {"operational": true, "pending_jobs": 4}}
        ]}"#;
        let resp: LegacyBackendsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.backends[0].status.pending_jobs, Some(4));
    }

    #[test]
    fn test_api_error_message_extraction() {
        let resp: ApiErrorResponse =
            serde_json::from_str(r#"{"errors": [{"message": "", "code": 1}, {"message": "bad crn"}]}"#)
                .unwrap();
        assert_eq!(resp.into_message().unwrap(), "bad crn");

        let resp: ApiErrorResponse = serde_json::from_str(r#"{"message": "expired"}"#).unwrap();
        assert_eq!(resp.into_message().unwrap(), "expired");
    }

    #[test]
    fn test_legacy_client_is_not_cloud() {
        let client = IbmClient::new("https://example.com", "test-token").unwrap();
        assert!(!client.is_cloud_api());
        assert_eq!(client.endpoint(), "https://example.com");
        assert!(!format!("{client:?}").contains("test-token"));
    }

    #[test]
    fn test_token_with_newline_rejected() {
        assert!(matches!(
            IbmClient::new(LEGACY_ENDPOINT, "bad\ntoken"),
            Err(IbmError::InvalidToken)
        ));
    }
}
