//! Shared harness for the HTTP tests: an in-memory store and request helpers

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use common::error::DatabaseResult;
use contact_api::{
    AppState,
    models::{
        contact::{Contact, ContactFields},
        user::{NewUser, UpdateUser, User},
    },
    password::hash_password,
    repositories::{ContactStore, UserStore},
};
use serde_json::Value;
use tower::ServiceExt;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    contacts: Vec<Contact>,
    next_contact_id: i32,
}

/// In-memory stand-in for the PostgreSQL repositories
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn user(&self, username: &str) -> Option<User> {
        let tables = self.tables.lock().unwrap();
        tables.users.iter().find(|u| u.username == username).cloned()
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.tables.lock().unwrap().contacts.clone()
    }

    pub fn max_contact_id(&self) -> i32 {
        self.contacts().iter().map(|c| c.id).max().unwrap_or(0)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<Option<User>> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Ok(None);
        }
        let user = User {
            username: new_user.username.clone(),
            password: new_user.password_hash.clone(),
            name: new_user.name.clone(),
            token: None,
        };
        tables.users.push(user.clone());
        Ok(Some(user))
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        Ok(self.user(username))
    }

    async fn find_by_token(&self, token: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.token.as_deref() == Some(token))
            .cloned())
    }

    async fn set_token(&self, username: &str, token: &str) -> DatabaseResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.username == username) {
            user.token = Some(token.to_string());
        }
        Ok(())
    }

    async fn clear_token(&self, username: &str) -> DatabaseResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.username == username) {
            user.token = None;
        }
        Ok(())
    }

    async fn update(&self, username: &str, changes: &UpdateUser) -> DatabaseResult<Option<User>> {
        let mut tables = self.tables.lock().unwrap();
        let Some(user) = tables.users.iter_mut().find(|u| u.username == username) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            user.password = password_hash.clone();
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create(&self, username: &str, fields: &ContactFields) -> DatabaseResult<Contact> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_contact_id += 1;
        let contact = Contact {
            id: tables.next_contact_id,
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            username: username.to_string(),
        };
        tables.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn find_owned(&self, username: &str, id: i32) -> DatabaseResult<Option<Contact>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .contacts
            .iter()
            .find(|c| c.id == id && c.username == username)
            .cloned())
    }

    async fn update_owned(
        &self,
        username: &str,
        id: i32,
        fields: &ContactFields,
    ) -> DatabaseResult<Option<Contact>> {
        let mut tables = self.tables.lock().unwrap();
        let Some(contact) = tables
            .contacts
            .iter_mut()
            .find(|c| c.id == id && c.username == username)
        else {
            return Ok(None);
        };
        contact.first_name = fields.first_name.clone();
        contact.last_name = fields.last_name.clone();
        contact.email = fields.email.clone();
        contact.phone = fields.phone.clone();
        Ok(Some(contact.clone()))
    }
}

/// Router over a fresh in-memory store
pub struct TestApp {
    pub store: MemoryStore,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::default();
        let state = AppState::new(Arc::new(store.clone()), Arc::new(store.clone()));
        Self {
            router: contact_api::create_router(state),
            store,
        }
    }

    /// Seed a logged-in user whose token equals its username
    pub async fn with_user(self, username: &str, password: &str) -> Self {
        let new_user = NewUser {
            username: username.to_string(),
            password_hash: hash_password(password).unwrap(),
            name: username.to_string(),
        };
        UserStore::create(&self.store, &new_user).await.unwrap();
        self.store.set_token(username, username).await.unwrap();
        self
    }

    /// Seed a contact owned by `username`
    pub async fn with_contact(self, username: &str) -> Self {
        let fields = ContactFields {
            first_name: "test".to_string(),
            last_name: Some("test".to_string()),
            email: Some("test@gmail.com".to_string()),
            phone: Some("080900000".to_string()),
        };
        ContactStore::create(&self.store, username, &fields)
            .await
            .unwrap();
        self
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }
}
