use crate::error::ApiError;
use actix_web::HttpRequest;
use skolero_infra::SkoleroContext;

/// The authenticated caller of a route
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub email: String,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

/// Resolves the caller identity from an opaque bearer token, or from the
/// plain `email` header the legacy clients send.
pub async fn protect_route(
    req: &HttpRequest,
    ctx: &SkoleroContext,
) -> Result<Identity, ApiError> {
    if let Some(token) = req.headers().get("authorization") {
        let token = token.to_str().map_err(|_| {
            ApiError::Unauthorized("Malformed authorization header provided".into())
        })?;
        let token = parse_authtoken_header(token);
        return match ctx.token_cache.resolve(&token) {
            Some(email) => Ok(Identity { email }),
            None => Err(ApiError::Unauthorized(
                "The provided bearer token is unknown or expired".into(),
            )),
        };
    }

    match req.headers().get("email") {
        Some(email) => match email.to_str() {
            Ok(email) if !email.is_empty() => Ok(Identity {
                email: email.to_string(),
            }),
            _ => Err(ApiError::Unauthorized(
                "Malformed email header provided".into(),
            )),
        },
        None => Err(ApiError::Unauthorized(
            "Missing credentials. Provide an authorization bearer token or an email header".into(),
        )),
    }
}
