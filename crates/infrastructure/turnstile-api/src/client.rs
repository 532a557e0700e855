use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use turnstile_core::{Event, Ticket};

use crate::error::{ApiError, ErrorBody, LOCATION_DENIED_FALLBACK};
use crate::session::Session;
use crate::wire::{
    AuthResponse, BuyTicketRequest, BuyTicketResponse, LoginRequest, QrResponse, RegisterRequest,
};

/// Port the application layer talks to. Implemented over HTTP below;
/// tests substitute a stub.
#[async_trait::async_trait]
pub trait TicketBackend: Send + Sync + 'static {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError>;
    async fn events(&self) -> Result<Vec<Event>, ApiError>;
    async fn buy_ticket(&self, event_id: &str, seat: &str) -> Result<BuyTicketResponse, ApiError>;
    async fn my_tickets(&self) -> Result<Vec<Ticket>, ApiError>;
    async fn generate_entry_qr(&self, ticket_id: &str) -> Result<String, ApiError>;
}

/// Shared HTTP client with the defaults every call site uses.
pub fn default_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .build()
        .map_err(|e| ApiError::Connection(format!("failed to build HTTP client: {e}")))
}

/// Normalize the service base URL so endpoint joins behave as paths under
/// it even when the caller omits the trailing slash.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ApiError::Connection(format!("invalid base url {base_url}: {e}")))?;
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}

/// HTTP/JSON client for the ticketing service. Owns the injected session
/// and decorates every authenticated request with its bearer token.
pub struct TicketServiceClient {
    http: Client,
    base: Url,
    session: Session,
}

impl TicketServiceClient {
    pub fn new(http: Client, base_url: &str, session: Session) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            base: normalize_base_url(base_url)?,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segs = url
                .path_segments_mut()
                .map_err(|_| ApiError::Connection("cannot mutate url segments".into()))?;
            segs.pop_if_empty();
            for s in segments {
                segs.push(s);
            }
        }
        Ok(url)
    }

    /// Attach `Authorization: Bearer <token>` when a session token exists;
    /// send the request bare otherwise and let the server reject it.
    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.current_token() {
            Some(token) => req.bearer_auth(token),
            None => {
                debug!("no session token, sending request without Authorization");
                req
            }
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        req.send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))
    }

    async fn decode_success<T: DeserializeOwned>(&self, resp: Response) -> Result<T, ApiError> {
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn login_internal(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["auth", "login"])?;
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let resp = self.send(self.http.post(url).json(&body)).await?;
        let status = resp.status();
        if status.is_success() {
            let auth: AuthResponse = self.decode_success(resp).await?;
            self.session.set_token(&auth.auth_jwt);
            return Ok(auth.auth_jwt);
        }

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Err(ApiError::InvalidCredentials),
            other => Err(ApiError::Status(other.as_u16())),
        }
    }

    async fn register_internal(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let url = self.endpoint(&["auth", "register"])?;
        let body = request.trimmed();

        let resp = self.send(self.http.post(url).json(&body)).await?;
        let status = resp.status();
        if status.is_success() {
            let auth: AuthResponse = self.decode_success(resp).await?;
            if auth.auth_jwt.trim().is_empty() {
                return Err(ApiError::Decode("no auth token in response".into()));
            }
            return Ok(auth.auth_jwt);
        }

        // Validation responses carry a structured body; surface field
        // errors so the form can annotate individual inputs. Unparseable
        // bodies degrade to the plain status error.
        let code = status.as_u16();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        match serde_json::from_slice::<ErrorBody>(&bytes) {
            Ok(parsed) => Err(ApiError::Validation {
                message: parsed.display_message(code),
                field_errors: parsed.errors.unwrap_or_default(),
            }),
            Err(_) => Err(ApiError::Status(code)),
        }
    }

    async fn events_internal(&self) -> Result<Vec<Event>, ApiError> {
        let url = self.endpoint(&["events"])?;
        let resp = self.send(self.authorized(self.http.get(url))).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        self.decode_success(resp).await
    }

    async fn buy_ticket_internal(
        &self,
        event_id: &str,
        seat: &str,
    ) -> Result<BuyTicketResponse, ApiError> {
        let url = self.endpoint(&["tickets", "buy-ticket"])?;
        let body = BuyTicketRequest {
            event_id: event_id.to_string(),
            seat: seat.to_string(),
        };

        debug!(event_id, seat, "submitting ticket purchase");
        let resp = self
            .send(self.authorized(self.http.post(url).json(&body)))
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        self.decode_success(resp).await
    }

    async fn my_tickets_internal(&self) -> Result<Vec<Ticket>, ApiError> {
        let url = self.endpoint(&["tickets"])?;
        let resp = self.send(self.authorized(self.http.get(url))).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        self.decode_success(resp).await
    }

    async fn generate_entry_qr_internal(&self, ticket_id: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["tickets", ticket_id, "generate-temporal-qr"])?;
        let resp = self.send(self.authorized(self.http.get(url))).await?;
        let status = resp.status();

        if status.is_success() {
            let qr: QrResponse = self.decode_success(resp).await?;
            return Ok(qr.qr_jwt);
        }

        if status == StatusCode::FORBIDDEN {
            // The server enforces geofencing: 403 means "not at the venue".
            let message = match resp.bytes().await {
                Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
                    .ok()
                    .and_then(|b| b.detail)
                    .unwrap_or_else(|| LOCATION_DENIED_FALLBACK.to_string()),
                Err(_) => LOCATION_DENIED_FALLBACK.to_string(),
            };
            return Err(ApiError::LocationDenied(message));
        }

        Err(ApiError::Status(status.as_u16()))
    }
}

#[async_trait::async_trait]
impl TicketBackend for TicketServiceClient {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.login_internal(username, password).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        self.register_internal(request).await
    }

    async fn events(&self) -> Result<Vec<Event>, ApiError> {
        self.events_internal().await
    }

    async fn buy_ticket(&self, event_id: &str, seat: &str) -> Result<BuyTicketResponse, ApiError> {
        self.buy_ticket_internal(event_id, seat).await
    }

    async fn my_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        self.my_tickets_internal().await
    }

    async fn generate_entry_qr(&self, ticket_id: &str) -> Result<String, ApiError> {
        self.generate_entry_qr_internal(ticket_id).await
    }
}
