/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use gale_http::server::Request;
use gale_types::net::SetCookie;
use gale_web::{Response, Router, Server, ServerConfig};

fn build_router() -> Router {
    let mut router = Router::new();
    router.get("/hello/<name>", |mut req: Request| async move {
        let who = req.param().get("name").unwrap_or("-").to_string();
        let q = req.param().get("q").unwrap_or("-").to_string();
        let session = req.cookie().get("session").unwrap_or("-").to_string();
        let mut rsp = Response::text(format!("hello {who} q={q} session={session}"));
        rsp.add_set_cookie(&SetCookie::new("visited", "yes"));
        rsp
    });
    router.post("/submit", |req: Request| async move {
        let mut lines = Vec::new();
        for (name, values) in req.param().iter() {
            for value in values {
                lines.push(format!("{name}={value}"));
            }
        }
        Response::text(lines.join("\n"))
    });
    router.post("/upload", |req: Request| async move {
        let mut lines = Vec::new();
        for part in req.parts() {
            lines.push(format!("{} {} {}", part.name, part.filename, part.size()));
        }
        Response::text(lines.join("\n"))
    });
    router
}

async fn roundtrip(addr: std::net::SocketAddr, msg: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(msg).await.unwrap();
    let mut rsp = Vec::new();
    stream.read_to_end(&mut rsp).await.unwrap();
    String::from_utf8(rsp).unwrap()
}

#[test]
fn loopback_requests() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(async {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = Server::new(ServerConfig::default(), build_router());
        let server_task = tokio::spawn(server.serve(listener));

        // path capture, query pair and cookie in one request
        let rsp = roundtrip(
            addr,
            b"GET /hello/world?q=rust HTTP/1.1\r\n\
              Host: t\r\n\
              Cookie: session=abc\r\n\
              \r\n",
        )
        .await;
        assert!(rsp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(rsp.contains("connection: close\r\n"));
        assert!(rsp.contains("set-cookie: visited=yes\r\n"));
        assert!(rsp.ends_with("hello world q=rust session=abc"));

        // urlencoded form body
        let body = "a=1&b=with+space";
        let msg = format!(
            "POST /submit HTTP/1.1\r\n\
             Host: t\r\n\
             Content-Type: application/x-www-form-urlencoded\r\n\
             Content-Length: {}\r\n\
             \r\n\
             {body}",
            body.len()
        );
        let rsp = roundtrip(addr, msg.as_bytes()).await;
        assert!(rsp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(rsp.ends_with("a=1\nb=with space"));

        // multipart form body
        let body = "--deadbeef\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\n\
            \r\n\
            content\r\n\
            --deadbeef--\r\n";
        let msg = format!(
            "POST /upload HTTP/1.1\r\n\
             Host: t\r\n\
             Content-Type: multipart/form-data; boundary=deadbeef\r\n\
             Content-Length: {}\r\n\
             \r\n\
             {body}",
            body.len()
        );
        let rsp = roundtrip(addr, msg.as_bytes()).await;
        assert!(rsp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(rsp.ends_with("file a.txt 7"));

        // no matching route
        let rsp = roundtrip(addr, b"GET /missing HTTP/1.1\r\nHost: t\r\n\r\n").await;
        assert!(rsp.starts_with("HTTP/1.1 404 Not Found\r\n"));

        // matching path, wrong method
        let rsp = roundtrip(addr, b"GET /submit HTTP/1.1\r\nHost: t\r\n\r\n").await;
        assert!(rsp.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
        assert!(rsp.contains("allow: POST\r\n"));

        // broken request line
        let rsp = roundtrip(addr, b"NOT-A-REQUEST-LINE\r\n\r\n").await;
        assert!(rsp.starts_with("HTTP/1.1 400 Bad Request\r\n"));

        server_task.abort();
    });
}
