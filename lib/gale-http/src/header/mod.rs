/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod content;
pub use content::{content_type, is_form_urlencoded, is_multipart_form_data, multipart_boundary};
