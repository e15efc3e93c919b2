/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::net::SocketAddr;

use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use gale_web::Hub;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:7700".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    println!("chat server listening on {addr}");

    let hub = Hub::spawn();
    loop {
        let (stream, peer_addr) = listener.accept().await.unwrap();
        let hub = hub.clone();
        tokio::spawn(async move {
            handle_client(stream, peer_addr, hub).await;
        });
    }
}

async fn handle_client(stream: TcpStream, peer_addr: SocketAddr, hub: Hub) {
    let Some(mut sub) = hub.subscribe().await else {
        return;
    };
    let (r, mut w) = stream.into_split();
    let mut lines = BufReader::new(r).lines();

    hub.publish(Bytes::from(format!("* {peer_addr} joined\n")));
    loop {
        tokio::select! {
            r = lines.next_line() => {
                match r {
                    Ok(Some(line)) => {
                        hub.publish(Bytes::from(format!("[{peer_addr}] {line}\n")));
                    }
                    _ => break,
                }
            }
            r = sub.recv() => {
                match r {
                    Some(msg) => {
                        if w.write_all(&msg).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }
    hub.publish(Bytes::from(format!("* {peer_addr} left\n")));
}
