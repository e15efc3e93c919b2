/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt::Write;
use std::time::Duration;

use gale_http::server::Request;
use gale_types::net::SetCookie;
use gale_web::{Response, Router, Server, ServerConfig};

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<form action="/upload" method="post" enctype="multipart/form-data">
<p><input type="text" name="note" placeholder="note"/></p>
<p><input type="file" name="file"/></p>
<p><input type="submit" value="upload"/></p>
</form>
</body>
</html>
"#;

async fn hello(mut req: Request) -> Response {
    let name = req.param().get("name").unwrap_or("stranger").to_string();
    let visits = req
        .cookie()
        .get("visits")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0)
        + 1;

    let mut rsp = Response::text(format!("hello {name}, visit {visits}\n"));
    rsp.add_set_cookie(
        &SetCookie::new("visits", visits.to_string()).max_age(Duration::from_secs(3600)),
    );
    rsp
}

async fn upload(req: Request) -> Response {
    let mut out = String::new();
    for (name, values) in req.param().iter() {
        for value in values {
            let _ = writeln!(out, "field {name}: {value}");
        }
    }
    for part in req.parts() {
        let _ = writeln!(
            out,
            "part {} filename {} type {} size {}",
            part.name,
            part.filename,
            part.content_type,
            part.size()
        );
    }
    Response::text(out)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:7780".to_string());

    let mut router = Router::new();
    router.get("/", |_req: Request| async { Response::html(INDEX_PAGE) });
    router.get("/hello", hello);
    router.get("/hello/<name>", hello);
    router.post("/upload", upload);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    println!("upload server listening on {addr}");
    Server::new(ServerConfig::default(), router).serve(listener).await;
}
