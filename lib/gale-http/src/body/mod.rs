/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod reader;
pub use reader::{Body, BodyReadError, BodyReader};
