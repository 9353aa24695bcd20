//! Named API operations
//!
//! Each operation builds its [`RequestEnvelope`], runs it through the
//! [`ApiClient`] and decodes the expected response shape. The `*_with`
//! variants run on the current tokio runtime and report through a
//! [`Completion`], so the result reaches the host's callback loop exactly
//! once.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use beagle_core::{Completion, ResponseFramer, SendThrottle};
use beagle_domain::constants::{
    ACCOUNT_NAMES_PATH, CLIENT_FLIPS_PATH, CLIENT_TRANSACTIONS_PATH, DEBUG_DATA_MIN_INTERVAL_SECS,
    DEBUG_DATA_PATH, DISPLAY_NAME_PARAM, INVALID_LOGIN_RESPONSE_MESSAGE, LOGIN_PATH,
    LOGIN_SUCCESS_MESSAGE, MSGPACK_CONTENT_TYPE, PREMIUM_STATUS_PATH, PREMIUM_UPDATE_PATH,
    PRICES_PATH, REGISTRATION_SUCCESS_MESSAGE, SIGNUP_PATH, SUGGESTION_PATH, UNKNOWN_SUBJECT_ID,
};
use beagle_domain::{
    AccountStatus, ApiError, Flip, ItemPrice, PremiumInstanceStatus, PriceRequest,
    RequestEnvelope, Session, SuggestionResponse, Transaction,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::runtime::Handle;
use tracing::{debug, info, instrument, warn};

use super::client::ApiClient;
use crate::codec::MsgPackCodec;

/// Body returned by `/login` and `/signup`.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(rename = "idToken", default)]
    id_token: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(rename = "refreshToken", default)]
    refresh_token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::decode(format!("failed to encode request body: {e}")))
}

/// The flipping assistant's API operations.
#[derive(Clone)]
pub struct CopilotApi {
    client: ApiClient,
    framer: ResponseFramer<MsgPackCodec>,
    debug_throttle: Arc<SendThrottle>,
}

impl CopilotApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            framer: ResponseFramer::new(MsgPackCodec),
            debug_throttle: Arc::new(SendThrottle::new(Duration::from_secs(
                DEBUG_DATA_MIN_INTERVAL_SECS,
            ))),
        }
    }

    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Sign in with email and password.
    ///
    /// Success requires both `idToken` and `uid` in the response. On any
    /// failure the session is replaced by an error session carrying the
    /// user-facing message.
    ///
    /// # Errors
    /// The failure that was recorded in the error session.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let envelope =
            RequestEnvelope::post(LOGIN_PATH, json!({ "email": email, "password": password }))
                .unauthenticated();

        let response = match self.client.execute_json::<AuthResponse>(&envelope).await {
            Ok(response) => response,
            Err(err) => return Err(self.record_failure(err.user_message(), err).await),
        };

        let (Some(token), Some(uid)) =
            (response.id_token.filter(|token| !token.is_empty()), response.uid)
        else {
            warn!("Login response was missing idToken or uid");
            let err = ApiError::decode("login response is missing idToken or uid");
            return Err(self.record_failure(INVALID_LOGIN_RESPONSE_MESSAGE, err).await);
        };

        let session = Session::authenticated(token, response.refresh_token, uid, LOGIN_SUCCESS_MESSAGE);
        self.client.session().set(Some(session.clone())).await;
        info!(user_id = %session.subject_id, "Login successful");
        Ok(session)
    }

    /// Create an account.
    ///
    /// A 2xx response always yields a non-error session; without an
    /// `idToken` that session is not authenticated and the user still has
    /// to log in.
    ///
    /// # Errors
    /// The failure that was recorded in the error session.
    #[instrument(skip_all)]
    pub async fn register(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let envelope = RequestEnvelope::post(
            SIGNUP_PATH,
            json!({ "email": email, "password": password, "returnSecureToken": true }),
        )
        .unauthenticated();

        let response = match self.client.execute_json::<AuthResponse>(&envelope).await {
            Ok(response) => response,
            Err(err) => return Err(self.record_failure(err.user_message(), err).await),
        };

        let session = Session::authenticated(
            response.id_token.unwrap_or_default(),
            response.refresh_token,
            response.uid.unwrap_or_else(|| UNKNOWN_SUBJECT_ID.to_string()),
            response.message.unwrap_or_else(|| REGISTRATION_SUCCESS_MESSAGE.to_string()),
        );
        self.client.session().set(Some(session.clone())).await;
        info!(
            user_id = %session.subject_id,
            signed_in = session.is_authenticated(),
            "Registration successful"
        );
        Ok(session)
    }

    async fn record_failure(&self, message: impl Into<String>, err: ApiError) -> ApiError {
        let message = message.into();
        warn!(error = %err, %message, "Authentication failed");
        self.client.session().set(Some(Session::failed(message))).await;
        err
    }

    pub async fn logout(&self) {
        self.client.session().reset().await;
        info!("Logged out");
    }

    /// Ask for the next suggestion, with price graph data when available.
    ///
    /// # Errors
    /// Any [`ApiError`]; secondary graph failures are reported inside the
    /// response instead.
    #[instrument(skip_all, fields(display_name = %status.display_name))]
    pub async fn fetch_suggestion(
        &self,
        status: &AccountStatus,
    ) -> Result<SuggestionResponse, ApiError> {
        let envelope =
            RequestEnvelope::post(SUGGESTION_PATH, to_body(status)?).with_accept(MSGPACK_CONTENT_TYPE);
        let response: SuggestionResponse = self
            .client
            .execute(&envelope, |response| self.framer.decode_multiplexed(response))
            .await?;

        debug!(
            kind = %response.primary.kind,
            item_id = response.primary.item_id,
            has_graph = response.secondary.data().is_some(),
            "Suggestion received"
        );
        Ok(response)
    }

    /// Upload new transactions and get back the flips they touched.
    ///
    /// # Errors
    /// Any [`ApiError`].
    #[instrument(skip_all, fields(count = transactions.len()))]
    pub async fn sync_transactions(
        &self,
        transactions: &[Transaction],
        display_name: &str,
    ) -> Result<Vec<Flip>, ApiError> {
        let envelope = RequestEnvelope::post(CLIENT_TRANSACTIONS_PATH, to_body(transactions)?)
            .with_query(DISPLAY_NAME_PARAM, display_name);
        let flips: Vec<Flip> = self.client.execute_json(&envelope).await?;
        debug!(flips = flips.len(), "Transactions synced");
        Ok(flips)
    }

    /// # Errors
    /// Any [`ApiError`].
    #[instrument(skip_all, fields(item_id = request.item_id))]
    pub async fn fetch_price(&self, request: &PriceRequest) -> Result<ItemPrice, ApiError> {
        let envelope =
            RequestEnvelope::post(PRICES_PATH, to_body(request)?).with_accept(MSGPACK_CONTENT_TYPE);
        self.client.execute(&envelope, |response| self.framer.decode_single(&response)).await
    }

    /// # Errors
    /// Any [`ApiError`].
    pub async fn premium_instance_status(&self) -> Result<PremiumInstanceStatus, ApiError> {
        self.client.execute_json(&RequestEnvelope::get(PREMIUM_STATUS_PATH)).await
    }

    /// Assign premium instances to the given display names.
    ///
    /// # Errors
    /// Any [`ApiError`].
    pub async fn update_premium_instances(
        &self,
        display_names: &[String],
    ) -> Result<PremiumInstanceStatus, ApiError> {
        let envelope = RequestEnvelope::post(
            PREMIUM_UPDATE_PATH,
            json!({ "premium_display_names": display_names }),
        );
        self.client.execute_json(&envelope).await
    }

    /// Display names linked to the account, keyed to their account ids.
    ///
    /// # Errors
    /// Any [`ApiError`].
    pub async fn account_names(&self, display_name: &str) -> Result<HashMap<String, i32>, ApiError> {
        let envelope =
            RequestEnvelope::get(ACCOUNT_NAMES_PATH).with_query(DISPLAY_NAME_PARAM, display_name);
        self.client.execute_json(&envelope).await
    }

    /// # Errors
    /// Any [`ApiError`].
    pub async fn flips(&self, display_name: &str) -> Result<Vec<Flip>, ApiError> {
        let envelope =
            RequestEnvelope::get(CLIENT_FLIPS_PATH).with_query(DISPLAY_NAME_PARAM, display_name);
        self.client.execute_json(&envelope).await
    }

    /// Post diagnostic data in the background.
    ///
    /// At most one send per five seconds; calls inside the window are
    /// dropped. Returns whether a send was started. Failures are only logged.
    pub fn send_debug_data(&self, payload: Value) -> bool {
        let Ok(handle) = Handle::try_current() else {
            warn!("Debug data dropped: no async runtime");
            return false;
        };
        if !self.debug_throttle.try_acquire() {
            debug!("Debug data suppressed by rate limit");
            return false;
        }

        let client = self.client.clone();
        handle.spawn(async move {
            let envelope = RequestEnvelope::post(DEBUG_DATA_PATH, payload);
            if let Err(err) = client.execute_empty(&envelope).await {
                debug!(error = %err, "Failed to send debug data");
            }
        });
        true
    }

    pub fn login_with(&self, email: String, password: String, completion: Completion<Session>) {
        let api = self.clone();
        spawn_completion(completion, async move { api.login(&email, &password).await });
    }

    pub fn register_with(&self, email: String, password: String, completion: Completion<Session>) {
        let api = self.clone();
        spawn_completion(completion, async move { api.register(&email, &password).await });
    }

    pub fn fetch_suggestion_with(
        &self,
        status: AccountStatus,
        completion: Completion<SuggestionResponse>,
    ) {
        let api = self.clone();
        spawn_completion(completion, async move { api.fetch_suggestion(&status).await });
    }

    pub fn sync_transactions_with(
        &self,
        transactions: Vec<Transaction>,
        display_name: String,
        completion: Completion<Vec<Flip>>,
    ) {
        let api = self.clone();
        spawn_completion(completion, async move {
            api.sync_transactions(&transactions, &display_name).await
        });
    }

    /// Failures complete with [`ItemPrice::unavailable`].
    pub fn fetch_price_with(&self, request: PriceRequest, completion: Completion<ItemPrice>) {
        let api = self.clone();
        spawn_completion(completion, async move {
            Ok(api.fetch_price(&request).await.unwrap_or_else(|err| {
                warn!(error = %err, item_id = request.item_id, "Price lookup failed");
                ItemPrice::unavailable()
            }))
        });
    }

    /// Failures complete with [`PremiumInstanceStatus::unavailable`].
    pub fn premium_instance_status_with(&self, completion: Completion<PremiumInstanceStatus>) {
        let api = self.clone();
        spawn_completion(completion, async move {
            Ok(api.premium_instance_status().await.unwrap_or_else(|err| {
                warn!(error = %err, "Fetching premium instance status failed");
                PremiumInstanceStatus::unavailable()
            }))
        });
    }

    /// Failures complete with [`PremiumInstanceStatus::unavailable`].
    pub fn update_premium_instances_with(
        &self,
        display_names: Vec<String>,
        completion: Completion<PremiumInstanceStatus>,
    ) {
        let api = self.clone();
        spawn_completion(completion, async move {
            Ok(api.update_premium_instances(&display_names).await.unwrap_or_else(|err| {
                warn!(error = %err, "Updating premium instance assignments failed");
                PremiumInstanceStatus::unavailable()
            }))
        });
    }
}

fn spawn_completion<T, F>(completion: Completion<T>, operation: F)
where
    T: Send + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                completion.complete(operation.await);
            });
        }
        Err(_) => completion.fail(ApiError::transport("no async runtime available")),
    }
}
