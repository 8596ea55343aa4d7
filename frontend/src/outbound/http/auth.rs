//! `/Auth` endpoints.

use async_trait::async_trait;
use reqwest::Method;

use super::HttpApiClient;
use super::dto::{AuthResponseDto, LoginDto, RegisterDto};
use crate::domain::ports::{ApiError, AuthApi};
use crate::domain::{AuthSession, LoginCredentials, Registration};

const LOGIN: &str = "/Auth/login";
const REGISTER: &str = "/Auth/register";

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, ApiError> {
        let body = LoginDto {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response: AuthResponseDto = self
            .execute_json(self.json_request(Method::POST, LOGIN, &body))
            .await?;
        response.into_domain().map_err(ApiError::decode)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSession, ApiError> {
        let credentials = registration.credentials();
        let body = RegisterDto {
            email: credentials.email(),
            password: credentials.password(),
            first_name: registration.first_name(),
            last_name: registration.last_name(),
            middle_name: registration.middle_name(),
        };
        let response: AuthResponseDto = self
            .execute_json(self.json_request(Method::POST, REGISTER, &body))
            .await?;
        response.into_domain().map_err(ApiError::decode)
    }
}
