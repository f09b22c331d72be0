//! # auth-service
//!
//! Application layer containing the authentication flows and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AuthenticatedPrincipal, CreatePrincipalRequest, LoginRequest, LogoutRequest,
    PrincipalResponse, RefreshRequest, TokenResponse,
};
pub use services::{
    AuditEvent, AuditSender, AuthService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
