/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod handler;
pub use handler::Handler;

mod response;
pub use response::Response;

mod router;
pub use router::Router;

mod server;
pub use server::{Server, ServerConfig};

mod hub;
pub use hub::{Hub, Subscription};
