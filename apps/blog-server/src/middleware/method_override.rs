//! Method-override middleware.
//!
//! HTML forms can only submit GET and POST, so update and delete arrive as
//! `POST /blogs/{id}?_method=PUT` (or `DELETE`). The middleware rewrites
//! the request method before routing. Only POST requests are rewritten,
//! and only to PUT or DELETE; anything else passes through untouched.

use std::future::{Ready, ready};

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
};

/// Method-override middleware factory.
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

pub struct MethodOverrideService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_from_query(req.query_string()) {
                tracing::debug!(path = req.path(), method = %method, "method override");
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}

fn override_from_query(query: &str) -> Option<Method> {
    let value = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("_method="))?;

    if value.eq_ignore_ascii_case("PUT") {
        Some(Method::PUT)
    } else if value.eq_ignore_ascii_case("DELETE") {
        Some(Method::DELETE)
    } else {
        None
    }
}
