use std::sync::Arc;

use crate::config::ApiConfig;
use crate::error::{PulseError, UploadError, ValidationError};
use crate::store::{LoadingGuard, ResultStore};
use crate::types::AnalysisResult;

/// Multipart form field carrying the CSV.
pub const FILE_FIELD: &str = "file";

/// Header the analytics API expects. Shown to the user, never checked here.
pub const EXPECTED_COLUMNS: [&str; 13] = [
    "user_id",
    "total_sessions",
    "avg_session_duration",
    "active_days",
    "daily_activity_std",
    "sessions_per_day",
    "active_days_ratio",
    "days_since_last_active",
    "sessions_last_7d",
    "sessions_prev_7d",
    "session_trend_ratio",
    "feature_entropy",
    "unique_features_used",
];

/// Raw HTTP outcome, before interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one multipart POST with the file under [`FILE_FIELD`].
///
/// Implementations map a failure to obtain any response to
/// [`UploadError::Transport`] and an abort to [`UploadError::Cancelled`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    type File: ?Sized;

    async fn post_file(&self, url: &str, file: &Self::File) -> Result<HttpReply, UploadError>;
}

/// Interpret a reply from `POST /upload-data`.
pub fn parse_upload_response(reply: &HttpReply) -> Result<AnalysisResult, UploadError> {
    if !reply.is_success() {
        return Err(UploadError::Status(reply.status));
    }
    serde_json::from_str(&reply.body).map_err(|e| UploadError::Decode(e.to_string()))
}

/// Upload a CSV and publish the analysis into `store`.
///
/// Makes no request when `file` is `None`. On any failure the previously
/// stored result stays in place. The loading flag is cleared on every exit
/// path unless a newer upload has started meanwhile.
pub async fn submit<S, T>(
    store: &S,
    transport: &T,
    config: &ApiConfig,
    file: Option<&T::File>,
) -> Result<Arc<AnalysisResult>, PulseError>
where
    S: ResultStore + ?Sized,
    T: Transport + ?Sized,
{
    let file = file.ok_or(ValidationError::NoFileSelected)?;

    let ticket = store.begin_upload();
    let _loading = LoadingGuard::new(store, ticket);

    let url = config.upload_url();
    log::info!("Uploading CSV to {url}");

    let outcome = match transport.post_file(&url, file).await {
        Ok(reply) => parse_upload_response(&reply),
        Err(e) => Err(e),
    };
    let result = match outcome {
        Ok(result) => Arc::new(result),
        Err(e) => {
            if e != UploadError::Cancelled {
                log::warn!("Upload failed: {e}");
            }
            return Err(e.into());
        }
    };

    if !store.publish(ticket, Arc::clone(&result)) {
        log::debug!("Discarding result from superseded upload");
        return Err(UploadError::Cancelled.into());
    }
    log::info!("Analysis received: {} rows", result.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{RiskLevel, UserRecord};
    use futures::executor::block_on;
    use std::cell::Cell;

    const EXAMPLE_BODY: &str = r#"{"data":[
        {"user_id":1,"churn_probability":0.82,"risk_level":"CRITICAL","is_anomaly":true,"recommended_action":"Offer discount"},
        {"user_id":2,"churn_probability":0.10,"risk_level":"HEALTHY","is_anomaly":false,"recommended_action":"None"}
    ]}"#;

    struct FakeTransport {
        reply: Result<HttpReply, UploadError>,
        calls: Cell<usize>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpReply { status, body: body.to_string() }),
                calls: Cell::new(0),
            }
        }

        fn failing(err: UploadError) -> Self {
            Self { reply: Err(err), calls: Cell::new(0) }
        }
    }

    impl Transport for FakeTransport {
        type File = str;

        async fn post_file(&self, url: &str, _file: &str) -> Result<HttpReply, UploadError> {
            assert!(url.ends_with("/upload-data"));
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    fn prior_result() -> AnalysisResult {
        AnalysisResult {
            meta: Default::default(),
            data: vec![UserRecord {
                user_id: 99,
                churn_probability: 0.5,
                risk_level: RiskLevel::AtRisk,
                recommended_action: "Show feature discovery nudge".into(),
                is_anomaly: false,
                primary_reason: None,
                anomaly_score: None,
            }],
        }
    }

    #[test]
    fn test_missing_file_makes_no_request() {
        let store = MemoryStore::new();
        let transport = FakeTransport::replying(200, EXAMPLE_BODY);
        let err = block_on(submit(&store, &transport, &ApiConfig::default(), None)).unwrap_err();
        assert_eq!(err, PulseError::Validation(ValidationError::NoFileSelected));
        assert_eq!(err.user_message().as_deref(), Some("Please select a CSV file"));
        assert_eq!(transport.calls.get(), 0);
        assert!(!store.is_loading());
        assert!(store.result().is_none());
    }

    #[test]
    fn test_success_replaces_result() {
        let store = MemoryStore::with_result(prior_result());
        let transport = FakeTransport::replying(200, EXAMPLE_BODY);
        let result =
            block_on(submit(&store, &transport, &ApiConfig::default(), Some("users.csv"))).unwrap();
        assert_eq!(transport.calls.get(), 1);
        assert_eq!(result.len(), 2);
        let stored = store.result().unwrap();
        assert_eq!(stored.data[0].user_id, 1);
        assert_eq!(stored.len(), 2, "new upload replaces, never accumulates");
        assert!(!store.is_loading());
    }

    #[test]
    fn test_server_error_keeps_prior_result() {
        let store = MemoryStore::with_result(prior_result());
        let transport = FakeTransport::replying(500, r#"{"detail":"boom"}"#);
        let err = block_on(submit(&store, &transport, &ApiConfig::default(), Some("users.csv")))
            .unwrap_err();
        assert_eq!(err, PulseError::Upload(UploadError::Status(500)));
        assert_eq!(
            err.user_message().as_deref(),
            Some("Upload failed. Please check the CSV format.")
        );
        assert_eq!(*store.result().unwrap(), prior_result());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_malformed_body_and_network_failure() {
        for transport in [
            FakeTransport::replying(200, "<html>gateway</html>"),
            FakeTransport::replying(200, r#"{"rows": []}"#),
            FakeTransport::failing(UploadError::Transport("connection refused".into())),
        ] {
            let store = MemoryStore::new();
            let err = block_on(submit(&store, &transport, &ApiConfig::default(), Some("a.csv")))
                .unwrap_err();
            assert!(err.user_message().is_some(), "{err}");
            assert!(store.result().is_none());
            assert!(!store.is_loading());
        }
    }

    #[test]
    fn test_cancelled_upload_is_silent() {
        let store = MemoryStore::with_result(prior_result());
        let transport = FakeTransport::failing(UploadError::Cancelled);
        let err = block_on(submit(&store, &transport, &ApiConfig::default(), Some("a.csv")))
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err.user_message(), None);
        assert_eq!(*store.result().unwrap(), prior_result());
        assert!(!store.is_loading());
    }

    /// Starts a competing upload while its own request is "in flight".
    struct SupersedingTransport<'a> {
        store: &'a MemoryStore,
    }

    impl Transport for SupersedingTransport<'_> {
        type File = str;

        async fn post_file(&self, _url: &str, _file: &str) -> Result<HttpReply, UploadError> {
            self.store.begin_upload();
            Ok(HttpReply { status: 200, body: EXAMPLE_BODY.to_string() })
        }
    }

    #[test]
    fn test_superseded_upload_does_not_publish() {
        let store = MemoryStore::with_result(prior_result());
        let transport = SupersedingTransport { store: &store };
        let err = block_on(submit(&store, &transport, &ApiConfig::default(), Some("a.csv")))
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(*store.result().unwrap(), prior_result());
        assert!(store.is_loading(), "the newer upload still owns the loading flag");
    }

    #[test]
    fn test_expected_columns_start_with_user_id() {
        assert_eq!(EXPECTED_COLUMNS[0], "user_id");
        assert_eq!(EXPECTED_COLUMNS.len(), 13);
    }
}
