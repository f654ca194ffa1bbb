use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    http::{header, StatusCode},
    web, HttpRequest, HttpResponse, Route,
};
use seller_admin_api_structs::ErrorResponse;
use seller_admin_infra::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminApiError {
    /// Unexpected failure, the message is handed to the client as is
    #[error("{0}")]
    InternalError(String),
    #[error("{0}")]
    BadClientData(String),
    #[error("{0}")]
    MissingConfiguration(String),
    #[error("{0}")]
    UnresolvableIdentity(String),
    /// Carries the methods the resource accepts, for the `Allow` header
    #[error("Método no permitido")]
    MethodNotAllowed(&'static str),
    /// Non success answer from an external service. Its status and body
    /// are relayed without reinterpretation.
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: String,
        detail: String,
    },
    /// An external service failed in a step where its status is not
    /// meaningful to the client. Answered with 500, the upstream body is
    /// kept as detail.
    #[error("{message}")]
    FailedStep {
        message: String,
        detail: Option<String>,
    },
}

impl AdminApiError {
    /// Turns a failed call to an external service into a response error.
    /// `message` says what this system was trying to do.
    pub fn from_service(message: &str, e: ServiceError) -> Self {
        match e {
            ServiceError::Upstream { status, detail } => Self::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: message.to_string(),
                detail,
            },
            e => Self::InternalError(format!("{}: {}", message, e)),
        }
    }

    /// Like `from_service`, but the response is always a 500
    pub fn from_failed_step(message: &str, e: ServiceError) -> Self {
        let detail = match e {
            ServiceError::Upstream { detail, .. } => detail,
            e => e.to_string(),
        };
        Self::FailedStep {
            message: message.to_string(),
            detail: Some(detail),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            Self::Upstream { detail, .. } => Some(detail.clone()),
            Self::FailedStep { detail, .. } => detail.clone(),
            _ => None,
        }
    }
}

impl actix_web::error::ResponseError for AdminApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::MissingConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnresolvableIdentity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Upstream { status, .. } => status,
            Self::FailedStep { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());
        if let Self::MethodNotAllowed(allowed) = self {
            res.insert_header((header::ALLOW, *allowed));
        }
        res.json(ErrorResponse {
            message: self.to_string(),
            detail: self.detail(),
        })
    }
}

/// Fallback route for methods a resource does not handle
pub fn method_not_allowed(allowed: &'static str) -> Route {
    web::to(move || async move {
        Err::<HttpResponse, _>(AdminApiError::MethodNotAllowed(allowed))
    })
}

/// Answers json bodies that cannot be extracted with the usual error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AdminApiError::BadClientData(format!("Cuerpo de la solicitud inválido: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AdminApiError::BadClientData(format!("Parámetros inválidos: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn upstream_status_is_kept() {
        let e = AdminApiError::from_service(
            "No se pudo crear el usuario",
            ServiceError::Upstream {
                status: 429,
                detail: "slow down".into(),
            },
        );
        assert_eq!(e.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(e.detail().as_deref(), Some("slow down"));
        assert_eq!(e.to_string(), "No se pudo crear el usuario");
    }

    #[test]
    fn failed_step_is_internal_and_keeps_detail() {
        let e = AdminApiError::from_failed_step(
            "No se pudo asignar el rol de vendedor",
            ServiceError::Upstream {
                status: 403,
                detail: "row-level security".into(),
            },
        );
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.detail().as_deref(), Some("row-level security"));
    }

    #[test]
    fn method_not_allowed_lists_accepted_methods() {
        let res = AdminApiError::MethodNotAllowed("POST").error_response();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers().get(header::ALLOW).unwrap(), "POST");
    }

    #[test]
    fn invalid_upstream_status_becomes_bad_gateway() {
        let e = AdminApiError::from_service(
            "x",
            ServiceError::Upstream {
                status: 1000,
                detail: "".into(),
            },
        );
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn transport_failures_are_internal() {
        let e = AdminApiError::from_service("x", ServiceError::Transport("connection reset".into()));
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.to_string().contains("connection reset"));
    }
}
