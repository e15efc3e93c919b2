/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::future::Future;
use std::pin::Pin;

use gale_http::server::Request;

use crate::Response;

/// A request handler.
///
/// Implemented for any `Fn(Request) -> impl Future<Output = Response>`, so
/// plain async functions and closures can be registered directly.
pub trait Handler: Send + Sync {
    fn handle(&self, req: Request) -> Pin<Box<dyn Future<Output = Response> + Send + '_>>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn handle(&self, req: Request) -> Pin<Box<dyn Future<Output = Response> + Send + '_>> {
        Box::pin((self)(req))
    }
}
