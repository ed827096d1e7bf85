// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Authenticated gateway to the ledger backend.
//!
//! Every call reads the access token from the session store, sends it as a
//! bearer header, and on a 401 performs exactly one refresh-and-retry cycle:
//! `POST /refresh_access_token` (authenticated by the refresh cookie captured
//! at sign-in), store the new token, re-issue the original request once. A
//! failed refresh, or a 401 that survives the retry, surfaces as
//! [`ApiError::Unauthorized`].

use anyhow::Result;
use reqwest::blocking::{Client, Response};
use reqwest::{Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    Category, CategoryDraft, CurrentPassword, MonthlyCategoryTotal, NewPassword, Profile,
    SigninRequest, SignupRequest, TokenResponse, Transaction, TransactionDraft,
};
use crate::session::SessionStore;
use crate::utils::http_client;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error")]
    Network(#[from] reqwest::Error),
    #[error("not authorized; run `kakeibo signin` to start a new session")]
    Unauthorized,
    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: StatusCode, body: String },
    #[error("could not persist session")]
    Session(#[source] std::io::Error),
}

pub struct ApiClient {
    base_url: String,
    http: Client,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self> {
        Ok(ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client()?,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ---- gateway primitives ----

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let res = self.execute(Method::GET, path, None::<&()>)?;
        Ok(res.json()?)
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let res = self.execute(Method::POST, path, Some(body))?;
        Ok(res.json()?)
    }

    pub fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let res = self.execute(Method::PUT, path, Some(body))?;
        Ok(res.json()?)
    }

    /// DELETE returns no usable body; discard it.
    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None::<&()>)?;
        Ok(())
    }

    /// One request, at most one silent refresh-and-retry. The token is read
    /// fresh from the session store on every invocation; an absent token is
    /// an empty string, not an error.
    fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let token = self.session.access_token();
        let res = self.send(method.clone(), path, body, &token)?;
        if res.status() == StatusCode::UNAUTHORIZED {
            let fresh = self.refresh_access_token()?;
            let retry = self.send(method, path, body, &fresh)?;
            return Self::check(retry);
        }
        Self::check(res)
    }

    fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: &str,
    ) -> Result<Response, ApiError> {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token));
        if let Some(cookie) = self.session.refresh_cookie() {
            req = req.header(header::COOKIE, cookie);
        }
        if let Some(b) = body {
            req = req.json(b);
        }
        Ok(req.send()?)
    }

    fn check(res: Response) -> Result<Response, ApiError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        if status == StatusCode::UNAUTHORIZED {
            // Still rejected after the refresh cycle.
            return Err(ApiError::Unauthorized);
        }
        Err(ApiError::RequestFailed {
            status,
            body: res.text().unwrap_or_default(),
        })
    }

    /// The single refresh cycle: cookie-authenticated, no bearer, no body.
    /// On success the new token overwrites the stored one.
    fn refresh_access_token(&self) -> Result<String, ApiError> {
        let mut req = self
            .http
            .post(format!("{}/refresh_access_token", self.base_url))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = self.session.refresh_cookie() {
            req = req.header(header::COOKIE, cookie);
        }
        let res = req.send()?;
        if !res.status().is_success() {
            return Err(ApiError::Unauthorized);
        }
        let token: TokenResponse = res.json()?;
        self.session
            .store_access_token(&token.access_token)
            .map_err(ApiError::Session)?;
        Ok(token.access_token)
    }

    // ---- auth ----

    /// Exchange credentials for an access token. The backend also sets the
    /// refresh cookie here; both are persisted as the new session.
    pub fn signin(&self, creds: &SigninRequest) -> Result<(), ApiError> {
        let res = self
            .http
            .post(format!("{}/signin", self.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(creds)
            .send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status,
                body: res.text().unwrap_or_default(),
            });
        }
        let refresh_cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(';').next())
            .map(|s| s.trim().to_string());
        let token: TokenResponse = res.json()?;
        self.session
            .store(&token.access_token, refresh_cookie)
            .map_err(ApiError::Session)?;
        Ok(())
    }

    pub fn signup(&self, account: &SignupRequest) -> Result<(), ApiError> {
        let res = self
            .http
            .post(format!("{}/signup", self.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(account)
            .send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status,
                body: res.text().unwrap_or_default(),
            });
        }
        Ok(())
    }

    // ---- categories ----

    pub fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/categories")
    }

    pub fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ApiError> {
        self.post("/categories", draft)
    }

    pub fn update_category(&self, id: &str, draft: &CategoryDraft) -> Result<Category, ApiError> {
        self.put(&format!("/categories/{}", id), draft)
    }

    /// Soft delete: flips `is_deleted`, keeping the category for historical
    /// transactions.
    pub fn soft_delete_category(&self, category: &Category) -> Result<Category, ApiError> {
        self.put(&format!("/categories/{}/delete", category.id), category)
    }

    pub fn restore_category(&self, category: &Category) -> Result<Category, ApiError> {
        self.put(&format!("/categories/{}/restore", category.id), category)
    }

    /// Hard delete: physically removes the category.
    pub fn destroy_category(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/categories/{}", id))
    }

    // ---- transactions ----

    /// `month` is zero-padded `YYYY-MM`.
    pub fn transactions_for_month(&self, month: &str) -> Result<Vec<Transaction>, ApiError> {
        self.get(&format!("/transactions?month={}", month))
    }

    pub fn transactions_for_category(&self, category_id: &str) -> Result<Vec<Transaction>, ApiError> {
        self.get(&format!("/transactions?categoryId={}", category_id))
    }

    /// Drill-down behind one summary cell: one category, one month (1-12) of
    /// the current year.
    pub fn transactions_in_cell(
        &self,
        category_id: &str,
        month: u32,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.get(&format!("/transactions/{}/{}", category_id, month))
    }

    pub fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ApiError> {
        self.post("/transactions", draft)
    }

    pub fn update_transaction(
        &self,
        id: &str,
        draft: &TransactionDraft,
    ) -> Result<Transaction, ApiError> {
        self.put(&format!("/transactions/{}", id), draft)
    }

    pub fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/transactions/{}", id))
    }

    pub fn annual_summary(&self, year: i32) -> Result<Vec<MonthlyCategoryTotal>, ApiError> {
        self.get(&format!("/transactions/summary?year={}", year))
    }

    // ---- account ----

    pub fn profile(&self) -> Result<Profile, ApiError> {
        self.get("/profile")
    }

    pub fn update_profile(&self, profile: &Profile) -> Result<Profile, ApiError> {
        self.put("/profile", profile)
    }

    pub fn check_password(&self, current: &CurrentPassword) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post("/checkPassword", current)?;
        Ok(())
    }

    pub fn set_new_password(&self, new: &NewPassword) -> Result<(), ApiError> {
        let _: serde_json::Value = self.put("/setNewPassword", new)?;
        Ok(())
    }
}
