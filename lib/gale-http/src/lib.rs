/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

pub mod header;
pub mod io;
pub mod parse;
pub mod server;

mod body;
pub use body::{Body, BodyReadError, BodyReader};

mod multipart;
pub use multipart::{MultipartForm, MultipartParser, MultipartSyntaxError, Part, parse_multipart_form};

mod form;
pub use form::{FormConfig, FormParseError, populate_form};
