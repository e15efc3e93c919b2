/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use http::{Method, StatusCode};

use gale_http::server::Request;

use crate::{Handler, Response};

enum Segment {
    Literal(String),
    Capture(String),
}

struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
                    Segment::Capture(s[1..s.len() - 1].to_string())
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();
        RoutePattern { segments }
    }

    /// Match a request path against this pattern, returning the captured
    /// segment values in pattern order.
    fn match_path<'a>(&self, path: &'a str) -> Option<Vec<(&str, &'a str)>> {
        let mut captures = Vec::new();
        let mut parts = path.split('/').filter(|s| !s.is_empty());
        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(s) => {
                    if s != part {
                        return None;
                    }
                }
                Segment::Capture(name) => captures.push((name.as_str(), part)),
            }
        }
        if parts.next().is_some() {
            return None;
        }
        Some(captures)
    }
}

struct Route {
    pattern: RoutePattern,
    method: Method,
    handler: Box<dyn Handler>,
}

/// Ordered route table. The first registered pattern that matches the
/// request path wins.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Router { routes: Vec::new() }
    }

    pub fn add_route<H>(&mut self, method: Method, pattern: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.routes.push(Route {
            pattern: RoutePattern::parse(pattern),
            method,
            handler: Box::new(handler),
        });
    }

    pub fn get<H>(&mut self, pattern: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.add_route(Method::GET, pattern, handler);
    }

    pub fn post<H>(&mut self, pattern: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.add_route(Method::POST, pattern, handler);
    }

    /// Dispatch the request to the first matching route.
    ///
    /// Captured path segments are appended to the request param map before
    /// the handler runs. A path that only matches routes of other methods
    /// gets a 405 response with an Allow header.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let path = req.uri.path().to_string();
        let mut allow: Vec<&str> = Vec::new();

        for route in &self.routes {
            let Some(captures) = route.pattern.match_path(&path) else {
                continue;
            };
            if route.method == req.method {
                for (name, value) in captures {
                    req.param_mut().add(name, value);
                }
                return route.handler.handle(req).await;
            }
            if !allow.contains(&route.method.as_str()) {
                allow.push(route.method.as_str());
            }
        }

        if allow.is_empty() {
            Response::new(StatusCode::NOT_FOUND)
        } else {
            let mut rsp = Response::new(StatusCode::METHOD_NOT_ALLOWED);
            rsp.set_header("allow", allow.join(", "));
            rsp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Uri, Version};

    fn request(method: Method, target: &str) -> Request {
        let uri = Uri::try_from(target).unwrap();
        Request::new(method, uri, Version::HTTP_11)
    }

    fn sample_router() -> Router {
        let mut router = Router::new();
        router.get("/", |_req: Request| async { Response::text("home") });
        router.get("/user/<id>", |req: Request| async move {
            Response::text(format!("user {}", req.param().get("id").unwrap_or("-")))
        });
        router.get("/file/<dir>/<name>", |req: Request| async move {
            Response::text(format!(
                "{}/{}",
                req.param().get("dir").unwrap_or("-"),
                req.param().get("name").unwrap_or("-")
            ))
        });
        router.post("/submit", |_req: Request| async { Response::text("posted") });
        router
    }

    #[tokio::test]
    async fn literal_match() {
        let router = sample_router();
        let rsp = router.dispatch(request(Method::GET, "/")).await;
        assert_eq!(rsp.status(), StatusCode::OK);
        assert_eq!(rsp.body().as_ref(), b"home");
    }

    #[tokio::test]
    async fn capture_match() {
        let router = sample_router();
        let rsp = router.dispatch(request(Method::GET, "/user/42")).await;
        assert_eq!(rsp.body().as_ref(), b"user 42");

        let rsp = router
            .dispatch(request(Method::GET, "/file/logs/today.txt"))
            .await;
        assert_eq!(rsp.body().as_ref(), b"logs/today.txt");
    }

    #[tokio::test]
    async fn capture_appends_after_existing_params() {
        let mut router = Router::new();
        router.get("/user/<id>", |req: Request| async move {
            let keys: Vec<&str> = req.param().keys().collect();
            Response::text(keys.join(","))
        });

        let mut req = request(Method::GET, "/user/42");
        req.param_mut().add("q", "1");
        let rsp = router.dispatch(req).await;
        assert_eq!(rsp.body().as_ref(), b"q,id");
    }

    #[tokio::test]
    async fn first_match_wins() {
        let mut router = Router::new();
        router.get("/a/<x>", |_req: Request| async { Response::text("one") });
        router.get("/a/b", |_req: Request| async { Response::text("two") });

        let rsp = router.dispatch(request(Method::GET, "/a/b")).await;
        assert_eq!(rsp.body().as_ref(), b"one");
    }

    #[tokio::test]
    async fn not_found() {
        let router = sample_router();
        let rsp = router.dispatch(request(Method::GET, "/missing")).await;
        assert_eq!(rsp.status(), StatusCode::NOT_FOUND);

        // trailing segments do not match shorter patterns
        let rsp = router.dispatch(request(Method::GET, "/user/42/extra")).await;
        assert_eq!(rsp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn method_not_allowed() {
        let router = sample_router();
        let rsp = router.dispatch(request(Method::GET, "/submit")).await;
        assert_eq!(rsp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(rsp.headers().get("allow"), Some("POST"));
    }
}
