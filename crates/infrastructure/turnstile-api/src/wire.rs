use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Form fields arrive with stray whitespace; the password is sent as-is.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            username: self.username.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub auth_jwt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuyTicketRequest {
    pub event_id: String,
    pub seat: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuyTicketResponse {
    pub success: bool,
    #[serde(default)]
    pub ticket_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QrResponse {
    pub qr_jwt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_trims_fields_but_not_password() {
        let req = RegisterRequest {
            name: " Ada ".into(),
            surname: "Lovelace ".into(),
            username: " ada".into(),
            phone: " 555 ".into(),
            email: " ada@example.com ".into(),
            password: " s3cret ".into(),
        };
        let t = req.trimmed();
        assert_eq!(t.name, "Ada");
        assert_eq!(t.email, "ada@example.com");
        assert_eq!(t.password, " s3cret ");
    }

    #[test]
    fn buy_ticket_response_tolerates_missing_optionals() {
        let resp: BuyTicketResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.ticket_id.is_none());
        assert!(resp.message.is_none());
    }
}
