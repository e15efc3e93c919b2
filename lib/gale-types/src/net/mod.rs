/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod values;
pub use values::ValueMap;

mod form;
pub use form::{DisplayFormEncoded, FormDecodeError, decode_value, encode_value, parse_encoded};

mod cookie;
pub use cookie::{SetCookie, parse_cookie_header};
