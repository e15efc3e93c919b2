/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use gale_types::net::{FormDecodeError, ValueMap, parse_encoded};

use crate::header;
use crate::multipart::parse_multipart_form;
use crate::server::Request;

mod error;
pub use error::FormParseError;

const DEFAULT_MAX_BODY_SIZE: usize = 1 << 20;

#[derive(Clone, Copy, Debug)]
pub struct FormConfig {
    max_body_size: Option<usize>,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            max_body_size: Some(DEFAULT_MAX_BODY_SIZE),
        }
    }
}

impl FormConfig {
    pub fn set_max_body_size(&mut self, max_size: Option<usize>) {
        self.max_body_size = max_size;
    }

    #[inline]
    pub fn max_body_size(&self) -> Option<usize> {
        self.max_body_size
    }
}

/// Decode the request body into the request param map according to the
/// request content type.
///
/// Bodies of type application/x-www-form-urlencoded are decoded as form
/// pairs. Bodies of type multipart/form-data are decoded into fields and
/// file parts, with the parts attached to the request. Any other content
/// type leaves the body untouched for the handler.
///
/// The param map and the parts are only updated if the whole body decodes.
pub async fn populate_form(req: &mut Request, config: &FormConfig) -> Result<(), FormParseError> {
    let Some(mime) = header::content_type(&req.headers) else {
        return Ok(());
    };

    if header::is_form_urlencoded(&mime) {
        let Some(mut reader) = req.body_mut().take_reader() else {
            return Err(FormParseError::AlreadyConsumed);
        };
        let data = reader.read_all(config.max_body_size).await?;
        let text = std::str::from_utf8(&data).map_err(FormDecodeError::from)?;

        let mut decoded = ValueMap::new();
        parse_encoded(text, &mut decoded)?;
        for (name, values) in decoded.iter() {
            for value in values {
                req.param_mut().add(name, value.as_str());
            }
        }
        Ok(())
    } else if header::is_multipart_form_data(&mime) {
        let parts = parse_multipart_form(req, config.max_body_size).await?;
        req.set_parts(parts);
        Ok(())
    } else {
        Ok(())
    }
}
