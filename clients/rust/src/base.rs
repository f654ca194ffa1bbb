use reqwest::{header::HeaderMap, Client, Method, RequestBuilder, Response, StatusCode};
use seller_admin_api_structs::ErrorResponse;
use serde::{Deserialize, Serialize};

pub(crate) struct BaseClient {
    address: String,
    client: Client,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    /// The server answered with another status than expected. `error` is
    /// the error body when the server sent one.
    UnexpectedStatusCode {
        status: StatusCode,
        error: Option<ErrorResponse>,
    },
}

impl APIError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatusCode { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::UnexpectedStatusCode {
                error: Some(error), ..
            } => Some(&error.message),
            _ => None,
        }
    }
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            client: Client::new(),
        }
    }

    /// `path` is relative to the `/api` scope
    fn get_client(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/{}", self.address, path);
        self.client.request(method, &url)
    }

    async fn check_status_code(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<Response> {
        let status = res.status();
        if status != expected_status_code {
            let error = res.json::<ErrorResponse>().await.ok();
            return Err(APIError::UnexpectedStatusCode { status, error });
        }
        Ok(res)
    }

    async fn get_json_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
    ) -> APIResponse<T> {
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    async fn send(&self, builder: RequestBuilder) -> APIResponse<Response> {
        builder.send().await.map_err(|_| APIError::Network)
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.get_with_headers(path, expected_status_code)
            .await
            .map(|(body, _)| body)
    }

    /// Like `get` but also hands back the response headers
    pub async fn get_with_headers<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<(T, HeaderMap)> {
        let res = self.send(self.get_client(Method::GET, path)).await?;
        let res = self.check_status_code(res, expected_status_code).await?;
        let headers = res.headers().clone();
        let body = self.get_json_response(res).await?;
        Ok((body, headers))
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.send(self.get_client(Method::DELETE, path)).await?;
        let res = self.check_status_code(res, expected_status_code).await?;
        self.get_json_response(res).await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.with_body(Method::PUT, body, path, expected_status_code)
            .await
    }

    pub async fn patch<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.with_body(Method::PATCH, body, path, expected_status_code)
            .await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.with_body(Method::POST, body, path, expected_status_code)
            .await
    }

    async fn with_body<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        method: Method,
        body: S,
        path: &str,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .send(self.get_client(method, path).json(&body))
            .await?;
        let res = self.check_status_code(res, expected_status_code).await?;
        self.get_json_response(res).await
    }

    /// Unchecked request to a path relative to the server root, for
    /// endpoints that do not answer with json
    pub async fn raw(&self, method: Method, path: &str) -> APIResponse<Response> {
        let url = format!("{}/{}", self.address, path);
        self.send(self.client.request(method, &url)).await
    }
}
