use async_trait::async_trait;
use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;
use chrono::Duration;

use crate::domain::session::errors::IssuerError;
use crate::domain::session::models::IdentityClaim;
use crate::domain::session::models::SessionToken;
use crate::domain::session::ports::TokenIssuer;
use crate::domain::session::ports::TokenVerifier;
use crate::domain::user::models::UserId;

/// HS256 JWT adapter for the token issuer and verifier ports.
pub struct JwtTokenIssuer {
    handler: JwtHandler,
    ttl: Duration,
    issuer: Option<String>,
}

impl JwtTokenIssuer {
    /// Create an issuer whose tokens expire `ttl` after minting.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            ttl,
            issuer: None,
        }
    }

    /// Stamp tokens with `iss` and reject tokens that lack it.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        let issuer = issuer.to_string();
        self.handler = self.handler.with_issuer(&issuer);
        self.issuer = Some(issuer);
        self
    }
}

impl From<JwtError> for IssuerError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => IssuerError::SigningFailed(msg),
            JwtError::TokenExpired => IssuerError::Expired,
            JwtError::DecodingFailed(msg) | JwtError::InvalidToken(msg) => {
                IssuerError::Invalid(msg)
            }
        }
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenIssuer {
    async fn issue(&self, claim: &IdentityClaim) -> Result<SessionToken, IssuerError> {
        let mut claims = Claims::for_subject(claim.user_id, self.ttl).with_email(&claim.email);
        if let Some(issuer) = &self.issuer {
            claims = claims.with_issuer(issuer);
        }

        let token = self.handler.encode(&claims)?;
        Ok(SessionToken::new(token))
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenIssuer {
    async fn verify(&self, token: &str) -> Result<IdentityClaim, IssuerError> {
        let claims: Claims = self.handler.decode(token)?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| IssuerError::Invalid(format!("bad subject: {}", e)))?;

        Ok(IdentityClaim {
            user_id,
            email: claims.email.unwrap_or_default(),
        })
    }
}
