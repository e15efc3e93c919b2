/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::net::SocketAddr;
use std::sync::Arc;

use http::{StatusCode, Version};
use log::{debug, warn};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};

use gale_http::server::Request;
use gale_http::{FormConfig, populate_form};

use crate::{Response, Router};

const DEFAULT_MAX_HEADER_SIZE: usize = 8192;

#[derive(Clone, Copy, Debug)]
pub struct ServerConfig {
    max_header_size: usize,
    form: FormConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            form: FormConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn set_max_header_size(&mut self, max_size: usize) {
        self.max_header_size = max_size;
    }

    #[inline]
    pub fn max_header_size(&self) -> usize {
        self.max_header_size
    }

    pub fn set_form_body_limit(&mut self, limit: Option<usize>) {
        self.form.set_max_body_size(limit);
    }

    #[inline]
    pub fn form_config(&self) -> &FormConfig {
        &self.form
    }
}

/// One request per connection HTTP server over a route table.
///
/// Responses always carry `Connection: close` and the socket is shut down
/// after the response is written.
pub struct Server {
    config: ServerConfig,
    router: Router,
}

impl Server {
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Server { config, router }
    }

    pub async fn serve(self, listener: TcpListener) {
        let server = Arc::new(self);
        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    let server = server.clone();
                    tokio::spawn(async move {
                        server.run_task(stream, peer_addr).await;
                    });
                }
                Err(e) => {
                    warn!("accept: {e:?}");
                }
            }
        }
    }

    async fn run_task(&self, stream: TcpStream, peer_addr: SocketAddr) {
        let (r, mut w) = stream.into_split();
        let reader = BufReader::new(r);

        let mut req = match Request::parse(reader, self.config.max_header_size).await {
            Ok(req) => req,
            Err(e) => {
                debug!("{peer_addr}: request not read: {e}");
                if let Some(status) = e.status_code() {
                    send_status(&mut w, Version::HTTP_11, status).await;
                }
                return;
            }
        };
        let version = req.version;

        if let Err(e) = populate_form(&mut req, self.config.form_config()).await {
            debug!("{peer_addr}: form not decoded: {e}");
            if let Some(status) = e.status_code() {
                send_status(&mut w, version, status).await;
            }
            return;
        }

        debug!("{peer_addr}: {} {}", req.method, req.uri);
        let rsp = self.router.dispatch(req).await;
        if let Err(e) = w.write_all(&rsp.serialize(version)).await {
            debug!("{peer_addr}: response not written: {e:?}");
            return;
        }
        let _ = w.shutdown().await;
    }
}

async fn send_status(w: &mut OwnedWriteHalf, version: Version, status: StatusCode) {
    let rsp = Response::new(status);
    let _ = w.write_all(&rsp.serialize(version)).await;
    let _ = w.shutdown().await;
}
